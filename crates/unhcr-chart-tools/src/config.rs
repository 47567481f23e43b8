use url::Url;

use crate::error::{Error, Result};

/// Rendering endpoint of the UNHCR plotting service.
pub const DEFAULT_ENDPOINT: &str = "https://unhcrpyplot.rvibek.com.np/plot";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub endpoint: Url,
}

impl ChartConfig {
    /// Builds a config for `endpoint`, which must be an absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        match endpoint.scheme() {
            "http" | "https" => Ok(Self { endpoint }),
            other => Err(Error::InvalidParameters(format!(
                "chart endpoint must use http or https, got '{other}'"
            ))),
        }
    }

    pub fn unhcr() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT)
    }
}

use bytes::Bytes;
use reqwest::Client;
use url::Url;

use crate::{
    config::ChartConfig,
    error::{Error, Result},
    model::ChartRequest,
};

const MAX_ERROR_BODY_CHARS: usize = 512;
// Four bytes per char covers any UTF-8 prefix of MAX_ERROR_BODY_CHARS.
const MAX_ERROR_BODY_BYTES: usize = MAX_ERROR_BODY_CHARS * 4;

/// HTTP client for the remote chart renderer.
#[derive(Debug, Clone)]
pub struct ChartClient {
    http: Client,
    endpoint: Url,
}

impl ChartClient {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.endpoint,
        }
    }

    /// Sets a custom reqwest client (e.g. for testing with `no_proxy()`).
    #[must_use]
    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts `request` as JSON and returns the raw image bytes.
    pub async fn render(&self, request: &ChartRequest) -> Result<Bytes> {
        let mut response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| Error::RemoteRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped(&mut response, MAX_ERROR_BODY_BYTES).await;
            let body = String::from_utf8_lossy(&body);
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown status").to_string()
            } else {
                body.chars().take(MAX_ERROR_BODY_CHARS).collect()
            };
            return Err(Error::HttpError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| Error::RemoteRequest(e.to_string()))
    }
}

/// Reads at most `limit` bytes of the body, stopping early instead of buffering the rest.
async fn read_capped(response: &mut reqwest::Response, limit: usize) -> Vec<u8> {
    let mut body = Vec::new();
    while body.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(limit - body.len());
                body.extend_from_slice(&chunk[..take]);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read error body");
                break;
            }
        }
    }
    body
}

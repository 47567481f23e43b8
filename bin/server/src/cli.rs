use clap::{Parser, ValueEnum};

use unhcr_chart_tools::config::DEFAULT_ENDPOINT;

#[derive(Parser, Debug)]
#[command(
    name = "unhcr-chart-mcp",
    version,
    about = "MCP server exposing UNHCR chart generation tools",
    rename_all = "kebab-case"
)]
pub struct Cli {
    /// How the host talks to this server
    #[arg(long, value_enum, env = "UNHCR_CHART_TRANSPORT", default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Listen address for the SSE transport
    #[arg(long, env = "UNHCR_CHART_BIND", default_value = "127.0.0.1:18000")]
    pub bind: String,

    /// Chart rendering endpoint
    #[arg(long, env = "UNHCR_CHART_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// HTTP server with an SSE event stream at /sse
    Sse,
}

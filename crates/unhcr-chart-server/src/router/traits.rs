use async_trait::async_trait;
use serde_json::Value;

use crate::{
    core::{CallToolResult, Tool, protocol::capabilities::ServerCapabilities},
    error::Result,
};

/// The tool surface a server exposes to its host.
#[async_trait]
pub trait Router: Send + Sync {
    fn name(&self) -> String;

    fn version(&self) -> String {
        "0.1.0".to_string()
    }

    fn instructions(&self) -> String;

    fn capabilities(&self) -> ServerCapabilities;

    fn list_tools(&self) -> Vec<Tool>;

    async fn call_tool(&self, tool_name: &str, arguments: Value) -> Result<CallToolResult>;
}

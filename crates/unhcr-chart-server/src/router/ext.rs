use async_trait::async_trait;
use serde_json::Value;

use crate::{
    core::{
        ToolCall,
        protocol::{
            constants::PROTOCOL_VERSION,
            message::{JsonRpcRequest, JsonRpcResponse, RequestId},
            result::{EmptyResult, Implementation, InitializeResult, ListToolsResult},
        },
    },
    error::{Error, Result},
    router::traits::Router,
};

/// JSON-RPC handlers shared by every [`Router`].
#[async_trait]
pub trait RouterExt: Router {
    fn create_response(&self, id: Option<RequestId>) -> JsonRpcResponse {
        JsonRpcResponse::new_empty(id)
    }

    async fn handle_initialize(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: self.capabilities(),
            server_info: Implementation {
                name: self.name(),
                version: self.version(),
            },
            instructions: Some(self.instructions()),
        };
        Ok(JsonRpcResponse::with_result(
            req.id,
            serde_json::to_value(result)?,
        ))
    }

    async fn handle_ping(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse> {
        Ok(JsonRpcResponse::with_result(
            req.id,
            serde_json::to_value(EmptyResult {})?,
        ))
    }

    async fn handle_tools_list(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let result = ListToolsResult {
            tools: self.list_tools(),
            next_cursor: None,
        };
        Ok(JsonRpcResponse::with_result(
            req.id,
            serde_json::to_value(result)?,
        ))
    }

    async fn handle_tools_call(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let params = req
            .params
            .ok_or_else(|| Error::InvalidParameters("Missing tools/call params".into()))?;
        let call: ToolCall = serde_json::from_value(params)
            .map_err(|e| Error::InvalidParameters(format!("Invalid tools/call params: {e}")))?;
        let arguments = match call.arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        tracing::info!(tool = %call.name, "Calling tool");
        let result = self.call_tool(&call.name, arguments).await?;
        Ok(JsonRpcResponse::with_result(
            req.id,
            serde_json::to_value(result)?,
        ))
    }
}

impl<T: Router + ?Sized> RouterExt for T {}

use tower_service::Service;
use tracing::Instrument;

use crate::{
    core::protocol::{
        constants::{INTERNAL_ERROR, INVALID_REQUEST, JSONRPC_EXPECTED_VERSION, PARSE_ERROR},
        error::ErrorData,
        message::{JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse},
    },
    error::{BoxError, Error, Result},
    transport::traits::ServerTransport,
};

pub struct Server<S> {
    service: S,
}

impl<S> Server<S>
where
    S: Service<JsonRpcRequest, Response = JsonRpcResponse> + Send,
    S::Error: Into<BoxError>,
    S::Future: Send,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub async fn run(self, mut transport: impl ServerTransport) -> Result<()> {
        let mut service = self.service;

        tracing::info!("Server started");
        while let Some(msg_result) = transport.read_message().await {
            let span = tracing::info_span!("message_processing");
            async {
                match msg_result {
                    Ok(msg) => Self::handle_message(&mut service, &mut transport, msg).await,
                    Err(e) => Self::handle_error(&mut transport, e).await,
                }
            }
            .instrument(span)
            .await?;
        }
        tracing::info!("Server transport closed, exiting run loop");

        transport.close().await
    }

    async fn handle_message(
        service: &mut S,
        transport: &mut impl ServerTransport,
        msg: JsonRpcMessage,
    ) -> Result<()> {
        match msg {
            JsonRpcMessage::Request(request) => {
                let response = Self::process_request(service, request).await;
                Self::send_response(transport, response).await?;
            }
            JsonRpcMessage::Notification(notification) => {
                tracing::debug!(method = %notification.method, "Ignoring notification");
            }
            JsonRpcMessage::Response(_) | JsonRpcMessage::Nil | JsonRpcMessage::Error(_) => {
                tracing::debug!("Ignoring non-request message from client");
            }
        }
        Ok(())
    }

    async fn process_request(service: &mut S, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let request_json = serde_json::to_string(&request)
            .unwrap_or_else(|_| "Failed to serialize request".to_string());

        tracing::debug!(
            request_id = ?id,
            method = ?request.method,
            json = %request_json,
            "Received request"
        );

        match service.call(request).await {
            Ok(resp) => resp,
            Err(e) => {
                let error: BoxError = e.into();
                let error_msg = error.to_string();
                tracing::error!(error = %error_msg, "Request processing failed");
                JsonRpcResponse::with_error(id, ErrorData::new(INTERNAL_ERROR, error_msg))
            }
        }
    }

    async fn send_response(
        transport: &mut impl ServerTransport,
        response: JsonRpcResponse,
    ) -> Result<()> {
        tracing::debug!(
            response_id = ?response.id,
            is_error = response.error.is_some(),
            "Sending response"
        );

        transport
            .write_message(JsonRpcMessage::Response(response))
            .await
    }

    async fn handle_error(transport: &mut impl ServerTransport, e: Error) -> Result<()> {
        tracing::warn!(error = %e, "Failed to read message");
        let code = match e {
            Error::Json(_) | Error::InvalidMessage(_) | Error::Utf8(_) => PARSE_ERROR,
            Error::Protocol(_) => INVALID_REQUEST,
            _ => INTERNAL_ERROR,
        };

        let error_response = JsonRpcMessage::Error(JsonRpcError {
            jsonrpc: JSONRPC_EXPECTED_VERSION.to_string(),
            id: None,
            error: ErrorData::new(code, e.to_string()),
        });

        transport.write_message(error_response).await
    }
}

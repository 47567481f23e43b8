use async_trait::async_trait;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use unhcr_chart_core::protocol::message::JsonRpcMessage;
use unhcr_chart_error::{Error, Result};

use crate::server::traits::ServerTransport;

/// A transport that wraps an SSE-style message sender.
///
/// Messages posted by the client arrive on `receiver`; everything the server writes is pushed
/// to `sender` and turned into `message` events by the HTTP layer.
pub struct SseTransport {
    sender: UnboundedSender<JsonRpcMessage>,
    receiver: UnboundedReceiver<JsonRpcMessage>,
}

impl SseTransport {
    pub fn new(
        sender: UnboundedSender<JsonRpcMessage>,
        receiver: UnboundedReceiver<JsonRpcMessage>,
    ) -> Self {
        Self { sender, receiver }
    }
}

#[async_trait]
impl ServerTransport for SseTransport {
    async fn write_message(&mut self, msg: JsonRpcMessage) -> Result<()> {
        self.sender.send(msg).map_err(|_| Error::ChannelClosed)
    }

    async fn read_message(&mut self) -> Option<Result<JsonRpcMessage>> {
        self.receiver.recv().await.map(Ok)
    }

    async fn close(&mut self) -> Result<()> {
        self.receiver.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use unhcr_chart_core::protocol::message::{JsonRpcRequest, JsonRpcResponse};

    use super::*;

    #[tokio::test]
    async fn relays_messages_in_both_directions() {
        let (to_client_tx, mut to_client_rx) = mpsc::unbounded_channel();
        let (to_server_tx, to_server_rx) = mpsc::unbounded_channel();
        let mut transport = SseTransport::new(to_client_tx, to_server_rx);

        let request = JsonRpcMessage::Request(JsonRpcRequest::new(1i64, "ping", None));
        to_server_tx.send(request.clone()).unwrap();
        assert_eq!(transport.read_message().await.unwrap().unwrap(), request);

        let response = JsonRpcMessage::Response(JsonRpcResponse::new_empty(None));
        transport.write_message(response.clone()).await.unwrap();
        assert_eq!(to_client_rx.recv().await, Some(response));
    }

    #[tokio::test]
    async fn write_fails_once_client_is_gone() {
        let (to_client_tx, to_client_rx) = mpsc::unbounded_channel();
        let (_to_server_tx, to_server_rx) = mpsc::unbounded_channel();
        let mut transport = SseTransport::new(to_client_tx, to_server_rx);
        drop(to_client_rx);

        let err = transport
            .write_message(JsonRpcMessage::Nil)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ChannelClosed));
    }
}

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use async_trait::async_trait;
use futures::{Stream, stream::StreamExt};
use pin_project::pin_project;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use unhcr_chart_core::{protocol::message::JsonRpcMessage, utils::parse_json_rpc_message};
use unhcr_chart_error::{Error, Result};

use crate::server::traits::ServerTransport;

const MAX_LINE_LENGTH: usize = 4 * 1024 * 1024;

#[pin_project]
/// A transport that reads and writes newline-delimited JSON-RPC messages over byte streams.
pub struct ByteTransport<R, W> {
    #[pin]
    reader: FramedRead<R, LinesCodec>,
    writer: W,
}

impl<R, W> ByteTransport<R, W>
where
    R: AsyncRead,
    W: AsyncWrite,
{
    /// Creates a new `ByteTransport` with the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)),
            writer,
        }
    }
}

impl<R, W> Stream for ByteTransport<R, W>
where
    R: AsyncRead,
{
    type Item = Result<JsonRpcMessage>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            match this.reader.as_mut().poll_next(cx) {
                Poll::Ready(None) => {
                    tracing::info!("Client closed connection");
                    return Poll::Ready(None);
                }
                Poll::Ready(Some(Ok(line))) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Poll::Ready(Some(parse_json_rpc_message(&line)));
                }
                Poll::Ready(Some(Err(LinesCodecError::MaxLineLengthExceeded))) => {
                    tracing::warn!(limit = MAX_LINE_LENGTH, "Dropping oversized line");
                    return Poll::Ready(Some(Err(Error::InvalidMessage(format!(
                        "line exceeds {MAX_LINE_LENGTH} bytes"
                    )))));
                }
                Poll::Ready(Some(Err(LinesCodecError::Io(e)))) => {
                    return Poll::Ready(Some(Err(Error::Io(e))));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[async_trait]
impl<R, W> ServerTransport for ByteTransport<R, W>
where
    R: AsyncRead + Unpin + Send + Sync,
    W: AsyncWrite + Unpin + Send + Sync,
{
    async fn read_message(&mut self) -> Option<Result<JsonRpcMessage>> {
        self.next().await
    }

    async fn write_message(&mut self, msg: JsonRpcMessage) -> Result<()> {
        let json = serde_json::to_string(&msg)?;
        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, duplex};
    use unhcr_chart_core::protocol::message::{JsonRpcResponse, RequestId};

    use super::*;

    #[tokio::test]
    async fn reads_one_message_per_line_and_skips_blank_lines() {
        let (mut client, server_read) = duplex(1024);
        let (server_write, _client_read) = duplex(1024);
        let mut transport = ByteTransport::new(server_read, server_write);

        client
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\n")
            .await
            .unwrap();
        client
            .write_all(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
            .await
            .unwrap();
        drop(client);

        let first = transport.read_message().await.unwrap().unwrap();
        assert!(matches!(first, JsonRpcMessage::Request(r) if r.method == "ping"));
        let second = transport.read_message().await.unwrap().unwrap();
        assert!(matches!(second, JsonRpcMessage::Notification(_)));
        assert!(transport.read_message().await.is_none());
    }

    #[tokio::test]
    async fn bad_line_does_not_end_the_stream() {
        let (mut client, server_read) = duplex(1024);
        let (server_write, _client_read) = duplex(1024);
        let mut transport = ByteTransport::new(server_read, server_write);

        client.write_all(b"garbage\n").await.unwrap();
        client
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n")
            .await
            .unwrap();
        drop(client);

        assert!(transport.read_message().await.unwrap().is_err());
        assert!(transport.read_message().await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn writes_newline_terminated_json() {
        let (_client, server_read) = duplex(1024);
        let (server_write, client_read) = duplex(1024);
        let mut transport = ByteTransport::new(server_read, server_write);

        let response = JsonRpcResponse::new_empty(Some(RequestId::Number(9)));
        transport
            .write_message(JsonRpcMessage::Response(response))
            .await
            .unwrap();

        let mut line = String::new();
        BufReader::new(client_read).read_line(&mut line).await.unwrap();
        assert_eq!(line, "{\"jsonrpc\":\"2.0\",\"id\":9}\n");
    }
}

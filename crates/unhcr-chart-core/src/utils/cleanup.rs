use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream as FuturesStream;

/// Wraps a stream and fires `shutdown_tx` once the inner stream is exhausted.
pub struct CleanupStream<S> {
    pub inner: S,
    pub shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl<S> CleanupStream<S> {
    pub fn new(inner: S, shutdown_tx: tokio::sync::oneshot::Sender<()>) -> Self {
        Self {
            inner,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl<S, T, E> FuturesStream for CleanupStream<S>
where
    S: FuturesStream<Item = Result<T, E>> + Unpin,
{
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let poll = Pin::new(&mut self.inner).poll_next(cx);
        if let Poll::Ready(None) = poll {
            if let Some(tx) = self.shutdown_tx.take() {
                let _ = tx.send(());
            }
        }
        poll
    }
}

impl<S> Drop for CleanupStream<S> {
    // the client may hang up before the stream is drained
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{StreamExt, stream};

    use super::*;

    #[tokio::test]
    async fn fires_shutdown_when_stream_ends() {
        let (tx, mut rx) = tokio::sync::oneshot::channel();
        let inner = stream::iter(vec![Ok::<u8, ()>(1), Ok(2)]);
        let mut cleanup = CleanupStream::new(inner, tx);

        assert_eq!(cleanup.next().await, Some(Ok(1)));
        assert!(rx.try_recv().is_err());
        assert_eq!(cleanup.next().await, Some(Ok(2)));
        assert_eq!(cleanup.next().await, None);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn fires_shutdown_when_dropped_early() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let inner = stream::iter(vec![Ok::<u8, ()>(1)]);
        drop(CleanupStream::new(inner, tx));
        assert!(rx.await.is_ok());
    }
}

use std::{collections::HashMap, io, sync::Arc};

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
    routing::get,
};
use tokio::sync::{RwLock, mpsc, oneshot};
use tokio_stream::{Stream, StreamExt, once, wrappers::UnboundedReceiverStream};
use tracing::Instrument;
use unhcr_chart_tools::{
    ChartRouter,
    core::{
        protocol::message::JsonRpcMessage,
        utils::{CleanupStream, parse_json_rpc_message},
    },
    server::{router::RouterService, server::Server, transport::SseTransport},
};

type SessionId = Arc<str>;
type SessionSender = mpsc::UnboundedSender<JsonRpcMessage>;

#[derive(Clone)]
pub struct App {
    channels: Arc<RwLock<HashMap<SessionId, SessionSender>>>,
    router: ChartRouter,
}

impl App {
    pub fn new(router: ChartRouter) -> Self {
        Self {
            channels: Default::default(),
            router,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/sse", get(sse_handler).post(post_handler))
            .with_state(self.clone())
    }
}

fn session_id() -> SessionId {
    Arc::from(uuid::Uuid::new_v4().simple().to_string())
}

async fn sse_handler(State(app): State<App>) -> Sse<impl Stream<Item = Result<Event, io::Error>>> {
    let session = session_id();
    tracing::info!(%session, "new SSE connection");

    let (to_client_tx, to_client_rx) = mpsc::unbounded_channel::<JsonRpcMessage>();
    let (to_server_tx, to_server_rx) = mpsc::unbounded_channel::<JsonRpcMessage>();
    app.channels
        .write()
        .await
        .insert(session.clone(), to_server_tx);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let session_for_task = session.clone();
    let channels = app.channels.clone();
    let router = app.router.clone();

    tokio::spawn(
        async move {
            let transport = SseTransport::new(to_client_tx, to_server_rx);
            let server = Server::new(RouterService(router));

            let result = tokio::select! {
                res = server.run(transport) => {
                    tracing::info!("server.run completed");
                    res
                },
                _ = shutdown_rx => {
                    tracing::info!("client disconnected, cleaning up");
                    Ok(())
                }
            };

            channels.write().await.remove(&session_for_task);

            if let Err(e) = result {
                tracing::error!(?e, "server run error");
            }
        }
        .instrument(tracing::info_span!("sse_session", %session)),
    );

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("?sessionId={session}"));

    let messages = UnboundedReceiverStream::new(to_client_rx).map(|msg| {
        serde_json::to_string(&msg)
            .map(|json| Event::default().event("message").data(json))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    });

    let stream = CleanupStream::new(once(Ok(endpoint)).chain(messages), shutdown_tx);

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    pub session_id: String,
}

async fn post_handler(
    State(app): State<App>,
    Query(PostQuery { session_id }): Query<PostQuery>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let sender = {
        let channels = app.channels.read().await;
        channels
            .get(session_id.as_str())
            .cloned()
            .ok_or_else(|| (StatusCode::NOT_FOUND, "Session not found".to_string()))?
    };

    let text = std::str::from_utf8(&body).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let msg = parse_json_rpc_message(text).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    tracing::debug!(%session_id, ?msg, "Received message");

    sender.send(msg).map_err(|_| {
        (
            StatusCode::GONE,
            "Session is shutting down".to_string(),
        )
    })?;

    Ok(StatusCode::ACCEPTED)
}

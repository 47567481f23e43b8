mod cli;
mod sse;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unhcr_chart_tools::{
    ChartClient, ChartConfig, ChartRouter,
    error::Result,
    server::{router::RouterService, server::Server, transport::ByteTransport},
};

use crate::{
    cli::{Cli, Transport},
    sse::App,
};

// stdout carries the stdio protocol, so logs always go to stderr
fn init_tracing() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("info,{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing();

    let config = ChartConfig::new(&cli.endpoint)?;
    tracing::info!(endpoint = %config.endpoint, transport = ?cli.transport, "Starting UNHCR chart server");
    let router = ChartRouter::new(ChartClient::new(config));

    match cli.transport {
        Transport::Stdio => serve_stdio(router).await,
        Transport::Sse => serve_sse(router, &cli.bind).await,
    }
}

async fn serve_stdio(router: ChartRouter) -> Result<()> {
    let transport = ByteTransport::new(tokio::io::stdin(), tokio::io::stdout());
    Server::new(RouterService(router)).run(transport).await
}

async fn serve_sse(router: ChartRouter, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("listening on http://{}/sse", listener.local_addr()?);

    axum::serve(listener, App::new(router).router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

mod app;
mod cache;
mod config;
mod connections;
mod handlers;
mod service;
mod state;
mod storage;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    state::{connection_manager, AppState},
};

/// CourseHub - REST API for course records
#[derive(Parser, Debug)]
#[command(name = "coursehub")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "LOG_FORMAT")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coursehub=debug,tower_http=debug".into());

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = Config::from_env()?;
    tracing::info!(
        collection = %config.collection(),
        cache_ttl_seconds = config.cache_ttl_seconds,
        cache_reads = config.cache_reads,
        connect_retries = config.connect_retries,
        "Configuration loaded"
    );

    let connections = connection_manager(&config);

    // Both connect loops run concurrently; only the store is required.
    let store_task = connections.spawn_connect_store();
    let cache_task = connections.spawn_connect_cache();

    if let Err(e) = store_task.wait().await {
        connections.close_all().await;
        return Err(e).context("Could not connect to the store");
    }

    let cache_service = cache_task.service();
    if let Err(e) = cache_task.wait().await {
        tracing::warn!(service = %cache_service, error = %e, "Starting without a cache connection");
    }

    let state = AppState::new(connections, &config);
    let app = create_app(state.clone(), config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to HOST:PORT
        None => {
            let addr = format!("{}:{}", cli.host, config.port);
            TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Could not bind {addr}"))?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    state.shutdown().await;
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

//! HTTP front end over a [`Repository`].

pub mod error;
mod handlers;
pub mod views;

use crate::config::ServeConfig;
use crate::repository::Repository;
use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared, read-only handler state.
pub struct AppState {
    pub repo: Repository,
}

pub fn router(state: Arc<AppState>, assets: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/m/:id", get(handlers::manga))
        .route("/c/:id", get(handlers::chapter))
        .route("/p/:id", get(handlers::page))
        .nest_service("/asset", ServeDir::new(assets))
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl Server {
    /// Binds `addr` and starts serving `app` on a background task.
    pub async fn bind(addr: impl ToSocketAddrs, app: Router) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .context("Failed to bind listener")?;
        let addr = listener
            .local_addr()
            .context("Failed to read bound address")?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting connections and waits up to `drain` for in-flight requests.
    pub async fn stop(mut self, drain: Duration) -> Result<()> {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        match tokio::time::timeout(drain, task).await {
            Ok(joined) => joined
                .context("Server task panicked")?
                .context("Server exited with an error"),
            Err(_) => {
                warn!(?drain, "in-flight requests did not finish before shutdown deadline");
                Ok(())
            }
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

pub const SHUTDOWN_DRAIN: Duration = Duration::from_secs(30);

/// Serves `repo` until a termination signal arrives.
pub async fn run(config: &ServeConfig, repo: Repository) -> Result<()> {
    let state = Arc::new(AppState { repo });
    let app = router(state, &config.assets);
    let server = Server::bind(config.addr.as_str(), app)
        .await
        .with_context(|| format!("Failed to listen on {}", config.addr))?;
    info!(addr = %server.addr(), "started");

    shutdown_signal().await;
    info!("shutting down");
    server.stop(SHUTDOWN_DRAIN).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::hangup())) {
            (Ok(mut term), Ok(mut hup)) => {
                tokio::select! {
                    _ = term.recv() => info!("SIGTERM received"),
                    _ = hup.recv() => info!("SIGHUP received"),
                }
            }
            _ => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received"),
        _ = terminate => {},
    }
}

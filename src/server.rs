//! HTTP server initialization and runtime setup.
//!
//! Opens storage, wires the link service into [`AppState`], and drives the
//! accept loop. Each connection is served by hyper with a header-read timeout
//! and is closed gracefully once its socket has been quiet for the idle
//! timeout. SIGINT or SIGTERM stops the loop and drains open connections.

use crate::application::services::{LinkService, LinkServiceConfig};
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::SqliteLinkRepository;
use crate::routes::app_router;
use crate::state::{AppState, BasicCredentials};
use crate::utils::alias::AliasGenerator;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context as TaskContext, Poll};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Per-connection timeouts.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionTimeouts {
    /// Time allowed for a client to send request headers.
    pub header_read: Duration,
    /// Time a connection may stay without socket activity.
    pub idle: Duration,
    /// Time open connections get to finish after shutdown starts.
    pub drain: Duration,
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite storage (file, schema)
/// - Link service with a process-wide alias generator
/// - Router with auth, tracing and timeout layers
/// - Accept loop with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - Server bind fails
pub async fn run(config: Config) -> Result<()> {
    let repository = SqliteLinkRepository::connect(&config.storage_path, config.db_max_connections)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to init storage"))
        .context("failed to init storage")?;
    tracing::info!("Storage opened");

    let state = build_state(Arc::new(repository), &config);
    let app = app_router(state, config.http_server.timeout);

    let listener = TcpListener::bind(&config.http_server.address)
        .await
        .with_context(|| format!("failed to bind {}", config.http_server.address))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let timeouts = ConnectionTimeouts {
        header_read: config.http_server.timeout,
        idle: config.http_server.idle_timeout,
        drain: config.http_server.timeout,
    };

    serve(listener, app, timeouts, shutdown_signal()).await;

    tracing::info!("Server stopped");
    Ok(())
}

/// Assembles application state on top of `repository`.
pub fn build_state(repository: Arc<dyn LinkRepository>, config: &Config) -> AppState {
    let link_service = LinkService::new(
        repository,
        Arc::new(AliasGenerator::new()),
        LinkServiceConfig {
            alias_length: config.alias_length,
            alias_retries: config.alias_retries,
        },
    );

    let credentials = BasicCredentials::new(
        config.http_server.user.clone(),
        config.http_server.password.clone(),
    );

    AppState::new(Arc::new(link_service), credentials)
}

/// Accepts connections on `listener` until `shutdown` resolves, then drains.
///
/// Open connections are asked to close gracefully and get
/// [`ConnectionTimeouts::drain`] to finish before they are aborted.
pub async fn serve<F>(listener: TcpListener, app: Router, timeouts: ConnectionTimeouts, shutdown: F)
where
    F: Future<Output = ()> + Send,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let mut connections = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let service = TowerToHyperService::new(app.clone());
                    connections.spawn(serve_connection(
                        stream,
                        peer,
                        service,
                        timeouts,
                        shutdown_rx.clone(),
                    ));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }

    drop(listener);
    tracing::info!(open = connections.len(), "Shutting down, draining connections");
    // Receivers see the change; a send error only means none are left.
    let _ = shutdown_tx.send(());

    let drain = async { while connections.join_next().await.is_some() {} };
    if tokio::time::timeout(timeouts.drain, drain).await.is_err() {
        tracing::warn!(
            open = connections.len(),
            "drain timed out, aborting connections"
        );
        connections.abort_all();
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: TowerToHyperService<Router>,
    timeouts: ConnectionTimeouts,
    mut shutdown: watch::Receiver<()>,
) {
    let activity = Activity::new();
    let io = TokioIo::new(ActivityStream {
        inner: stream,
        activity: activity.clone(),
    });

    let mut builder = auto::Builder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(timeouts.header_read);

    let conn = builder.serve_connection_with_upgrades(io, service);
    tokio::pin!(conn);

    let mut closing = false;
    loop {
        let idle_deadline = activity.last_active() + timeouts.idle;

        tokio::select! {
            result = conn.as_mut() => {
                if let Err(e) = result {
                    tracing::debug!(%peer, error = %e, "connection error");
                }
                break;
            }
            _ = tokio::time::sleep_until(idle_deadline.into()), if !closing => {
                if activity.last_active().elapsed() >= timeouts.idle {
                    tracing::debug!(%peer, "closing idle connection");
                    conn.as_mut().graceful_shutdown();
                    closing = true;
                }
            }
            _ = shutdown.changed(), if !closing => {
                conn.as_mut().graceful_shutdown();
                closing = true;
            }
        }
    }
}

/// Last time bytes moved on a connection.
#[derive(Clone)]
struct Activity {
    origin: Instant,
    last_millis: Arc<AtomicU64>,
}

impl Activity {
    fn new() -> Self {
        Self {
            origin: Instant::now(),
            last_millis: Arc::new(AtomicU64::new(0)),
        }
    }

    fn touch(&self) {
        let millis = u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_millis.store(millis, Ordering::Relaxed);
    }

    fn last_active(&self) -> Instant {
        self.origin + Duration::from_millis(self.last_millis.load(Ordering::Relaxed))
    }
}

/// TCP stream that records read and write activity.
struct ActivityStream {
    inner: TcpStream,
    activity: Activity,
}

impl AsyncRead for ActivityStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut TaskContext<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let poll = Pin::new(&mut this.inner).poll_read(cx, buf);
        if buf.filled().len() > before {
            this.activity.touch();
        }
        poll
    }
}

impl AsyncWrite for ActivityStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut TaskContext<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(n)) = poll
            && n > 0
        {
            this.activity.touch();
        }
        poll
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut TaskContext<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_write_vectored(cx, bufs);
        if let Poll::Ready(Ok(n)) = poll
            && n > 0
        {
            this.activity.touch();
        }
        poll
    }

    fn is_write_vectored(&self) -> bool {
        self.inner.is_write_vectored()
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

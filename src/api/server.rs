//! Control API server lifecycle
//!
//! `ControlServer` serves the API router on its own thread with a private
//! tokio runtime, so the render loop never runs async code and never waits
//! on network I/O. The listener is bound synchronously in `start()` so a
//! port conflict is reported to the caller instead of dying on the thread.

use std::future::IntoFuture;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use axum::Router;
use parking_lot::Mutex;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

use super::routes::create_router;
use crate::effects::PlaybackHandle;

/// Default API port
pub const DEFAULT_API_PORT: u16 = 8080;

/// How long in-flight requests get to finish once shutdown is signalled.
/// Connections still open after this are dropped.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Where the control server listens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_API_PORT,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

/// Control server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind control API on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("Failed to configure control API listener: {0}")]
    Listener(#[source] io::Error),
    #[error("Failed to build control API runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("Failed to spawn control API thread: {0}")]
    Spawn(#[source] io::Error),
}

/// A running serve thread
struct ServerWorker {
    thread: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
    local_addr: SocketAddr,
}

/// HTTP control server for a playback scheduler
pub struct ControlServer {
    playback: PlaybackHandle,
    config: ServerConfig,
    /// Built on first start, reused by every later start
    router: OnceLock<Router>,
    route_registrations: AtomicUsize,
    running: AtomicBool,
    worker: Mutex<Option<ServerWorker>>,
}

impl ControlServer {
    pub fn new(playback: PlaybackHandle, config: ServerConfig) -> Self {
        Self {
            playback,
            config,
            router: OnceLock::new(),
            route_registrations: AtomicUsize::new(0),
            running: AtomicBool::new(false),
            worker: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the listener and start serving on a background thread.
    ///
    /// Calling this while already running does nothing.
    pub fn start(&self) -> Result<(), ServerError> {
        let mut worker = self.worker.lock();
        if self.running.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        match self.spawn_worker() {
            Ok(spawned) => {
                *worker = Some(spawned);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                tracing::error!(error = %e, "Control API failed to start");
                Err(e)
            }
        }
    }

    /// Signal the serve thread to shut down and wait for it.
    ///
    /// Returns within roughly `SHUTDOWN_GRACE` even when clients hold
    /// requests open. Safe to call repeatedly and when never started.
    pub fn stop(&self) {
        let worker = {
            let mut guard = self.worker.lock();
            if !self.running.swap(false, Ordering::AcqRel) {
                return;
            }
            guard.take()
        };

        let Some(worker) = worker else {
            return;
        };

        tracing::info!(addr = %worker.local_addr, "Control API shutting down");
        // The serve loop also exits if the sender is simply dropped
        let _ = worker.shutdown_tx.send(true);
        if worker.thread.join().is_err() {
            tracing::error!("Control API thread panicked");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Address actually bound, while running
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.worker.lock().as_ref().map(|w| w.local_addr)
    }

    /// How many times the routes have been built for this server
    pub fn route_registrations(&self) -> usize {
        self.route_registrations.load(Ordering::Acquire)
    }

    fn router(&self) -> Router {
        self.router
            .get_or_init(|| {
                self.route_registrations.fetch_add(1, Ordering::AcqRel);
                let cors = CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any);
                create_router(self.playback.clone()).layer(cors)
            })
            .clone()
    }

    fn spawn_worker(&self) -> Result<ServerWorker, ServerError> {
        let addr = self.config.socket_addr();
        let listener =
            std::net::TcpListener::bind(addr).map_err(|source| ServerError::Bind { addr, source })?;
        listener.set_nonblocking(true).map_err(ServerError::Listener)?;
        let local_addr = listener.local_addr().map_err(ServerError::Listener)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("control-api-io")
            .enable_all()
            .build()
            .map_err(ServerError::Runtime)?;

        let router = self.router();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let thread = thread::Builder::new()
            .name("control-server".into())
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = match tokio::net::TcpListener::from_std(listener) {
                        Ok(listener) => listener,
                        Err(e) => {
                            tracing::error!(error = %e, "Control API listener rejected by runtime");
                            return;
                        }
                    };

                    tracing::info!("Control API listening on http://{}", local_addr);
                    let mut deadline_rx = shutdown_rx.clone();
                    let serve = axum::serve(listener, router)
                        .with_graceful_shutdown(async move {
                            let _ = shutdown_rx.changed().await;
                        })
                        .into_future();
                    let deadline = async move {
                        let _ = deadline_rx.changed().await;
                        tokio::time::sleep(SHUTDOWN_GRACE).await;
                    };

                    tokio::select! {
                        result = serve => {
                            if let Err(e) = result {
                                tracing::error!(error = %e, "Control API server error");
                            }
                        }
                        _ = deadline => {
                            tracing::warn!(
                                grace_ms = SHUTDOWN_GRACE.as_millis() as u64,
                                "Control API connections still open after shutdown, dropping them"
                            );
                        }
                    }
                });
                // Connection tasks spawned by the server must not outlive the thread
                runtime.shutdown_timeout(Duration::from_millis(100));
                tracing::info!("Control API stopped");
            })
            .map_err(ServerError::Spawn)?;

        Ok(ServerWorker {
            thread,
            shutdown_tx,
            local_addr,
        })
    }
}

impl Drop for ControlServer {
    fn drop(&mut self) {
        self.stop();
    }
}

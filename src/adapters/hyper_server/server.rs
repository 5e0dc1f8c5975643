use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder as ServerBuilder;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::{debug, error};

use super::{text_response, Body, HyperRelayAdapter};
use crate::adapters::logging::StderrLogger;
use crate::adapters::tcp_dialer::TcpDialer;
use crate::domain::{RelayError, RelayService, Result, ServerConfig};
use crate::ports::LoggerPort;

/// Path the relay handler is mounted at when the server runs standalone.
pub const WEBSOCKIFY_PATH: &str = "/websockify";

// HTTP request-phase limits; an upgraded relay is not bounded in time.
const HEADER_READ_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_HEADER_BYTES: usize = 1024 * 1024;

/// Standalone websockify server: the relay handler at `/websockify` plus
/// optional static file service for every other path.
pub struct Server {
    config: ServerConfig,
    logger: Arc<dyn LoggerPort>,
}

impl Server {
    /// Create a server logging to stderr.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            logger: Arc::new(StderrLogger),
        }
    }

    /// Replace the logger capability (e.g. `NoopLogger` for silence).
    pub fn with_logger(mut self, logger: Arc<dyn LoggerPort>) -> Self {
        self.logger = logger;
        self
    }

    /// Serve until `lifetime` is cancelled or the listener fails.
    ///
    /// Refuses to start when the web root equals the process working
    /// directory; that refusal is logged and is not an error. Bind and
    /// accept failures are returned to the caller.
    pub async fn serve(&self, lifetime: CancellationToken) -> Result<()> {
        let cwd = std::env::current_dir().map_err(|e| {
            RelayError::StartupFailed(format!("unable to determine the working directory: {}", e))
        })?;

        let static_root = match &self.config.web_root {
            Some(root) if *root == cwd => {
                self.logger
                    .line("Refusing to serve static content from the current working directory.");
                self.logger.line("Pass a different web root directory.");
                self.logger.line("Exiting.");
                return Ok(());
            }
            Some(root) => {
                self.logger.event(format_args!(
                    "Serving {} at {}",
                    root.display(),
                    self.config.listen_addr
                ));
                Some(root.clone())
            }
            None => {
                self.logger
                    .line("No web root specified; serving no static content.");
                None
            }
        };

        self.logger.event(format_args!(
            "Serving WS of {} at {}",
            self.config.target_addr, self.config.listen_addr
        ));

        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .map_err(|e| RelayError::BindFailed(format!("{}: {}", self.config.listen_addr, e)))?;

        let dialer = Arc::new(TcpDialer::new(self.config.target_addr.clone()));
        let service = Arc::new(RelayService::new(dialer, self.logger.clone()));
        let handler = Arc::new(HyperRelayAdapter::new(service, lifetime.clone()));

        loop {
            let (stream, _peer) = tokio::select! {
                _ = lifetime.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        // A failing listener would spin this loop; give up
                        // and surface the error instead.
                        error!("accept failed: {}", e);
                        return Err(RelayError::AcceptFailed(e.to_string()));
                    }
                },
            };

            let io = TokioIo::new(stream);
            let handler = handler.clone();
            let static_root = static_root.clone();

            tokio::spawn(async move {
                let service_fn = service_fn(move |req| {
                    let handler = handler.clone();
                    let static_root = static_root.clone();
                    async move { Ok::<_, hyper::Error>(route(req, handler, static_root).await) }
                });

                if let Err(e) = ServerBuilder::new(TokioExecutor::new())
                    .http1()
                    .timer(TokioTimer::new())
                    .header_read_timeout(HEADER_READ_TIMEOUT)
                    .max_buf_size(MAX_HEADER_BYTES)
                    .serve_connection_with_upgrades(io, service_fn)
                    .await
                {
                    debug!("connection error: {}", e);
                }
            });
        }

        Ok(())
    }
}

async fn route(
    req: Request<Incoming>,
    handler: Arc<HyperRelayAdapter>,
    static_root: Option<PathBuf>,
) -> Response<Body> {
    if req.uri().path() == WEBSOCKIFY_PATH {
        return handler.handle(req).await;
    }
    match static_root {
        Some(root) => serve_static(req, &root).await,
        None => text_response(StatusCode::NOT_FOUND, "not found"),
    }
}

async fn serve_static(req: Request<Incoming>, root: &Path) -> Response<Body> {
    match ServeDir::new(root).oneshot(req).await {
        Ok(response) => response.map(|body| body.boxed_unsync()),
        Err(infallible) => match infallible {},
    }
}

//! WebSocket-to-TCP relay ("websockify").
//!
//! Accepts browser-originated WebSocket connections, dials a configured
//! upstream TCP endpoint per connection, and relays opaque bytes in both
//! directions until either side closes. Intended for browser clients of
//! binary TCP protocols (notably VNC/RFB) that cannot open raw
//! sockets. The relay interprets nothing: no RFB knowledge, no
//! authentication, no TLS (delegate those to a fronting reverse proxy).
//!
//! # Standalone
//!
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use websockify::{Server, ServerConfig};
//!
//! # async fn run() -> websockify::Result<()> {
//! let config = ServerConfig::new("0.0.0.0:6080", "localhost:5900").with_web_root("./web");
//! let lifetime = CancellationToken::new();
//! Server::new(config).serve(lifetime).await
//! # }
//! ```
//!
//! # Custom logger
//!
//! All relay-lifetime output goes through the [`LoggerPort`] capability,
//! so embedders can route it anywhere:
//!
//! ```no_run
//! use std::fmt;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use websockify::{LoggerPort, Server, ServerConfig};
//!
//! struct TracingLogger;
//!
//! impl LoggerPort for TracingLogger {
//!     fn event(&self, message: fmt::Arguments<'_>) {
//!         tracing::info!("{}", message);
//!     }
//!     fn line(&self, message: &str) {
//!         tracing::info!("{}", message);
//!     }
//! }
//!
//! # async fn run() -> websockify::Result<()> {
//! let config = ServerConfig::new("0.0.0.0:8080", "localhost:5900");
//! Server::new(config)
//!     .with_logger(Arc::new(TracingLogger))
//!     .serve(CancellationToken::new())
//!     .await
//! # }
//! ```
//!
//! For silent operation pass [`NoopLogger`] instead.
//!
//! # Embedding the handler
//!
//! [`HyperRelayAdapter`] is a plain hyper handler and can be mounted at
//! any path of an existing router; the cancellation token given at
//! construction scopes the lifetime of every relay it spawns.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod relay;

pub use adapters::{Body, HyperRelayAdapter, NoopLogger, Server, StderrLogger, TcpDialer, WEBSOCKIFY_PATH};
pub use domain::{RelayError, RelayService, Result, ServerConfig, UpgradeDecision};
pub use ports::{DialerPort, LoggerPort};
pub use relay::RelaySupervisor;

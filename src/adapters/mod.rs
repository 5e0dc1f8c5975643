pub mod hyper_server;
pub mod logging;
pub mod tcp_dialer;

pub use hyper_server::{Body, HyperRelayAdapter, Server, WEBSOCKIFY_PATH};
pub use logging::{NoopLogger, StderrLogger};
pub use tcp_dialer::TcpDialer;

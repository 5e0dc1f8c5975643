#![cfg(test)]
#![allow(dead_code)]

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use websockify::{LoggerPort, Server, ServerConfig};

/// A full websockify server running on a fixed local port.
pub struct TestRelayServer {
    port: u16,
    lifetime: CancellationToken,
    server_handle: JoinHandle<websockify::Result<()>>,
}

impl TestRelayServer {
    pub async fn start(port: u16, target_addr: impl Into<String>, logger: Arc<dyn LoggerPort>) -> Self {
        let config = ServerConfig::new(format!("127.0.0.1:{}", port), target_addr);
        let server = Server::new(config).with_logger(logger);

        let lifetime = CancellationToken::new();
        let token = lifetime.clone();
        let server_handle = tokio::spawn(async move { server.serve(token).await });

        Self {
            port,
            lifetime,
            server_handle,
        }
    }

    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/websockify", self.port)
    }

    /// Cancel the server lifetime and wait for `serve` to return.
    pub async fn shutdown(self) -> websockify::Result<()> {
        self.lifetime.cancel();
        self.server_handle.await.unwrap()
    }
}

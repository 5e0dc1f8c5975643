use crate::domain::Result;
use async_trait::async_trait;
use tokio::net::TcpStream;

/// Port for opening the upstream TCP connection of a relay.
#[async_trait]
pub trait DialerPort: Send + Sync {
    /// Dial the configured upstream target.
    ///
    /// Called exactly once per upgraded WebSocket. Implementations do not
    /// retry; a failed dial fails the relay.
    async fn dial(&self) -> Result<TcpStream>;
}

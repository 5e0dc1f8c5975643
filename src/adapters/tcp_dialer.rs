use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::domain::{RelayError, Result};
use crate::ports::DialerPort;

/// Plain TCP dialer for the configured upstream target.
pub struct TcpDialer {
    target_addr: String,
}

impl TcpDialer {
    pub fn new(target_addr: impl Into<String>) -> Self {
        Self {
            target_addr: target_addr.into(),
        }
    }
}

#[async_trait]
impl DialerPort for TcpDialer {
    async fn dial(&self) -> Result<TcpStream> {
        let stream = TcpStream::connect(&self.target_addr)
            .await
            .map_err(|e| RelayError::DialFailed(format!("{}: {}", self.target_addr, e)))?;
        // Relayed protocols are interactive; small writes must not be batched.
        stream
            .set_nodelay(true)
            .map_err(|e| RelayError::DialFailed(format!("{}: {}", self.target_addr, e)))?;
        Ok(stream)
    }
}

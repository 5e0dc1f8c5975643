use std::sync::Arc;

use tokio::net::TcpStream;

use super::{Result, UpgradeDecision};
use crate::ports::{DialerPort, LoggerPort};

/// Admission and upstream-dial decisions for incoming upgrade requests.
#[derive(Clone)]
pub struct RelayService {
    dialer: Arc<dyn DialerPort>,
    logger: Arc<dyn LoggerPort>,
}

impl RelayService {
    pub fn new(dialer: Arc<dyn DialerPort>, logger: Arc<dyn LoggerPort>) -> Self {
        Self { dialer, logger }
    }

    /// Admit or reject an upgrade based on the request's Origin header.
    ///
    /// A present, non-empty Origin is evidence of a browser-initiated
    /// upgrade and is sufficient; there is no allowlist. Stricter origin
    /// policy belongs in a fronting reverse proxy.
    pub fn admit_upgrade(&self, origin: Option<&str>) -> UpgradeDecision {
        match origin {
            Some(origin) if !origin.is_empty() => UpgradeDecision::Accept,
            _ => UpgradeDecision::Rejected {
                reason: "missing or empty Origin header".to_string(),
            },
        }
    }

    /// Open the upstream TCP connection for one relay. No retries.
    pub async fn dial_upstream(&self) -> Result<TcpStream> {
        self.dialer.dial().await
    }

    pub fn logger(&self) -> Arc<dyn LoggerPort> {
        self.logger.clone()
    }
}

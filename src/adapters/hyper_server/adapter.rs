use std::sync::Arc;

use hyper::body::Incoming;
use hyper::header::ORIGIN;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio_tungstenite::tungstenite::protocol::Role;
use tokio_tungstenite::WebSocketStream;
use tokio_util::sync::CancellationToken;

use super::upgrade::{accept_response, reject_response, socket_config, validate_upgrade};
use super::Body;
use crate::domain::{RelayService, UpgradeDecision};
use crate::relay::RelaySupervisor;

/// Hyper handler running the upgrade-dial-supervise pipeline.
///
/// Mountable at any path of an externally supplied router; `lifetime` is
/// the parent cancellation token of every relay the handler spawns.
/// Relay failures never surface as error responses: once the handshake
/// response is produced, everything else is logged and contained.
pub struct HyperRelayAdapter {
    service: Arc<RelayService>,
    lifetime: CancellationToken,
}

impl HyperRelayAdapter {
    pub fn new(service: Arc<RelayService>, lifetime: CancellationToken) -> Self {
        Self { service, lifetime }
    }

    pub async fn handle(&self, req: Request<Incoming>) -> Response<Body> {
        let logger = self.service.logger();

        let origin = req.headers().get(ORIGIN).and_then(|value| value.to_str().ok());
        if let UpgradeDecision::Rejected { reason } = self.service.admit_upgrade(origin) {
            logger.event(format_args!("refusing WebSocket upgrade: {}", reason));
            return reject_response(StatusCode::FORBIDDEN, &reason);
        }

        let accept_key = match validate_upgrade(&req) {
            Ok(key) => key,
            Err(rejection) => {
                logger.event(format_args!(
                    "failed to upgrade to WebSocket: {}",
                    rejection.reason
                ));
                return reject_response(rejection.status, &rejection.reason);
            }
        };

        let service = self.service.clone();
        let parent = self.lifetime.clone();
        tokio::spawn(async move {
            let logger = service.logger();

            let upgraded = match hyper::upgrade::on(req).await {
                Ok(upgraded) => upgraded,
                Err(e) => {
                    logger.event(format_args!("failed to upgrade to WebSocket: {}", e));
                    return;
                }
            };
            let mut ws = WebSocketStream::from_raw_socket(
                TokioIo::new(upgraded),
                Role::Server,
                Some(socket_config()),
            )
            .await;

            // One dial per upgraded WebSocket; on failure the socket is
            // closed before giving up on the relay.
            let tcp = match service.dial_upstream().await {
                Ok(tcp) => tcp,
                Err(e) => {
                    logger.event(format_args!("failed to reach the target: {}", e));
                    let _ = ws.close(None).await;
                    return;
                }
            };

            RelaySupervisor::new(ws, tcp, parent, logger).run().await;
        });

        accept_response(&accept_key)
    }
}

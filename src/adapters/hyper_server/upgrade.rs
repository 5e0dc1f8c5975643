//! WebSocket handshake validation and response building on hyper types.

use hyper::header::{CONNECTION, SEC_WEBSOCKET_ACCEPT, SEC_WEBSOCKET_KEY, SEC_WEBSOCKET_VERSION, UPGRADE};
use hyper::{Method, Request, Response, StatusCode};
use tokio_tungstenite::tungstenite::handshake::derive_accept_key;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

use super::{empty_body, text_response, Body};

/// Why a handshake request was turned away.
#[derive(Debug)]
pub(super) struct HandshakeRejection {
    pub status: StatusCode,
    pub reason: String,
}

impl HandshakeRejection {
    fn bad_request(reason: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            reason: reason.to_string(),
        }
    }
}

/// Validate the handshake headers and derive the accept key.
pub(super) fn validate_upgrade<B>(req: &Request<B>) -> Result<String, HandshakeRejection> {
    if req.method() != Method::GET {
        return Err(HandshakeRejection::bad_request("handshake request must be a GET"));
    }

    let connection_has_upgrade = req
        .headers()
        .get(CONNECTION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("upgrade"))
        .unwrap_or(false);
    if !connection_has_upgrade {
        return Err(HandshakeRejection::bad_request("missing or invalid Connection header"));
    }

    let upgrade_is_websocket = req
        .headers()
        .get(UPGRADE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.eq_ignore_ascii_case("websocket"))
        .unwrap_or(false);
    if !upgrade_is_websocket {
        return Err(HandshakeRejection::bad_request("missing or invalid Upgrade header"));
    }

    match req
        .headers()
        .get(SEC_WEBSOCKET_VERSION)
        .and_then(|value| value.to_str().ok())
    {
        Some("13") => {}
        _ => {
            return Err(HandshakeRejection {
                status: StatusCode::UPGRADE_REQUIRED,
                reason: "unsupported WebSocket version".to_string(),
            })
        }
    }

    let key = req
        .headers()
        .get(SEC_WEBSOCKET_KEY)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| HandshakeRejection::bad_request("missing Sec-WebSocket-Key header"))?;

    Ok(derive_accept_key(key.as_bytes()))
}

pub(super) fn accept_response(accept_key: &str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::SWITCHING_PROTOCOLS)
        .header(CONNECTION, "Upgrade")
        .header(UPGRADE, "websocket")
        .header(SEC_WEBSOCKET_ACCEPT, accept_key)
        .body(empty_body())
        .unwrap()
}

pub(super) fn reject_response(status: StatusCode, reason: &str) -> Response<Body> {
    text_response(status, reason)
}

/// 1024-byte I/O buffers in both directions; not a message size limit.
pub(super) fn socket_config() -> WebSocketConfig {
    let mut config = WebSocketConfig::default();
    config.read_buffer_size = 1024;
    config.write_buffer_size = 1024;
    config
}

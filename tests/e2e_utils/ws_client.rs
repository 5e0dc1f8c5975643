#![cfg(test)]
#![allow(dead_code)]

use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Error;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connect with an explicit Origin header, the way a browser does.
pub async fn connect_with_origin(url: &str, origin: &str) -> Result<WsClient, Error> {
    let mut request = url.into_client_request()?;
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_str(origin).unwrap());
    let (ws, _response) = connect_async(request).await?;
    Ok(ws)
}

/// Connect without an Origin header; the server must refuse this.
pub async fn connect_without_origin(url: &str) -> Result<WsClient, Error> {
    let (ws, _response) = connect_async(url).await?;
    Ok(ws)
}

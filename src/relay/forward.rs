use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{FutureExt, SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tokio_util::sync::CancellationToken;

use super::{POLL_INTERVAL, TCP_READ_BUFFER};
use crate::ports::LoggerPort;

/// Forward upstream TCP bytes to the WebSocket.
///
/// Each successful read of `n` bytes is emitted as one binary message of
/// length `n`, in read order; reads are never coalesced. On exit the
/// WebSocket sink is closed.
pub(super) async fn tcp_to_ws<S>(
    mut tcp_read: OwnedReadHalf,
    mut ws_sink: SplitSink<WebSocketStream<S>, Message>,
    token: CancellationToken,
    done: mpsc::Sender<()>,
    logger: Arc<dyn LoggerPort>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = [0u8; TCP_READ_BUFFER];
    loop {
        if token.is_cancelled() {
            break;
        }

        let read = match timeout(POLL_INTERVAL, tcp_read.read(&mut buf)).await {
            // Deadline exceeded: no data yet, poll again.
            Err(_) => continue,
            Ok(read) => read,
        };

        match read {
            Ok(0) => {
                logger.event(format_args!("upstream closed the connection"));
                break;
            }
            Ok(n) => {
                if let Err(e) = ws_sink.send(Message::binary(Bytes::copy_from_slice(&buf[..n]))).await {
                    logger.event(format_args!("writing to WebSocket failed: {}", e));
                    break;
                }
            }
            Err(e) => {
                logger.event(format_args!("reading from upstream failed: {}", e));
                break;
            }
        }
    }

    let _ = ws_sink.close().await;
    let _ = done.try_send(());
}

/// Forward WebSocket message payloads to upstream TCP.
///
/// The text/binary distinction is ignored; only payload bytes are
/// written. The receive loop runs behind an unwind boundary so a fault
/// inside it is logged and still produces a `done` signal. On exit the
/// TCP write half is shut down.
pub(super) async fn ws_to_tcp<S>(
    mut ws_stream: SplitStream<WebSocketStream<S>>,
    mut tcp_write: OwnedWriteHalf,
    token: CancellationToken,
    done: mpsc::Sender<()>,
    logger: Arc<dyn LoggerPort>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let relay = relay_messages(&mut ws_stream, &mut tcp_write, &token, logger.as_ref());
    if let Err(panic) = AssertUnwindSafe(relay).catch_unwind().await {
        logger.event(format_args!(
            "WebSocket forwarding panic: {}",
            describe_panic(panic.as_ref())
        ));
    }

    let _ = tcp_write.shutdown().await;
    let _ = done.try_send(());
}

async fn relay_messages<S>(
    ws_stream: &mut SplitStream<WebSocketStream<S>>,
    tcp_write: &mut OwnedWriteHalf,
    token: &CancellationToken,
    logger: &dyn LoggerPort,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        if token.is_cancelled() {
            return;
        }

        let received = match timeout(POLL_INTERVAL, ws_stream.next()).await {
            Err(_) => continue,
            Ok(received) => received,
        };

        match received {
            None => {
                logger.event(format_args!("WebSocket stream ended"));
                return;
            }
            Some(Err(e)) => {
                logger.event(format_args!("reading from WebSocket failed: {}", e));
                return;
            }
            Some(Ok(Message::Close(frame))) => {
                match frame {
                    Some(frame) => {
                        logger.event(format_args!("WebSocket closed: {} {}", frame.code, frame.reason))
                    }
                    None => logger.event(format_args!("WebSocket closed")),
                }
                return;
            }
            // Control traffic; the library answers pings on its own.
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
            Some(Ok(message)) => {
                // write_all retries short writes until the payload is out.
                if let Err(e) = tcp_write.write_all(&message.into_data()).await {
                    logger.event(format_args!("writing to upstream failed: {}", e));
                    return;
                }
            }
        }
    }
}

fn describe_panic(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

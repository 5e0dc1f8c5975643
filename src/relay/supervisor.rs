use std::sync::Arc;

use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tokio_tungstenite::WebSocketStream;
use tokio_util::sync::CancellationToken;

use super::{forward, SHUTDOWN_GRACE};
use crate::ports::LoggerPort;

/// Owns one (WebSocket, TCP) pair and the two forwarders relaying
/// between them.
///
/// The supervisor couples the lifetimes of both endpoints: whichever
/// forwarder terminates first (peer closure, transport fault, or
/// cancellation of the parent lifetime) tears the whole relay down. Any
/// error is local to the relay and never escapes `run`.
pub struct RelaySupervisor<S> {
    ws: WebSocketStream<S>,
    tcp: TcpStream,
    parent: CancellationToken,
    logger: Arc<dyn LoggerPort>,
}

impl<S> RelaySupervisor<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(
        ws: WebSocketStream<S>,
        tcp: TcpStream,
        parent: CancellationToken,
        logger: Arc<dyn LoggerPort>,
    ) -> Self {
        Self {
            ws,
            tcp,
            parent,
            logger,
        }
    }

    /// Relay until either direction terminates or the parent lifetime is
    /// cancelled, then close both endpoints and wait for both forwarders.
    pub async fn run(self) {
        let Self {
            ws,
            tcp,
            parent,
            logger,
        } = self;

        let token = parent.child_token();
        // Capacity 2: both forwarders signal on exit and neither may block.
        let (done_tx, mut done_rx) = mpsc::channel::<()>(2);

        let (ws_sink, ws_stream) = ws.split();
        let (tcp_read, tcp_write) = tcp.into_split();

        let mut tcp_to_ws = tokio::spawn(forward::tcp_to_ws(
            tcp_read,
            ws_sink,
            token.clone(),
            done_tx.clone(),
            logger.clone(),
        ));
        let mut ws_to_tcp = tokio::spawn(forward::ws_to_tcp(
            ws_stream,
            tcp_write,
            token.clone(),
            done_tx,
            logger.clone(),
        ));

        tokio::select! {
            _ = token.cancelled() => {
                logger.event(format_args!("relay cancelled"));
            }
            _ = done_rx.recv() => {}
        }

        // Idempotent; wakes whichever forwarder is parked in a
        // poll-bounded read so it can close its output and return.
        token.cancel();

        // Only reads carry a deadline. A forwarder stalled in a write to
        // an unreading peer never observes the cancel, so any forwarder
        // still running at the deadline is aborted: dropping its endpoint
        // halves closes the underlying sockets and releases the stalled
        // write.
        let deadline = Instant::now() + SHUTDOWN_GRACE;
        for forwarder in [&mut tcp_to_ws, &mut ws_to_tcp] {
            if timeout_at(deadline, &mut *forwarder).await.is_err() {
                forwarder.abort();
                let _ = (&mut *forwarder).await;
            }
        }
    }
}

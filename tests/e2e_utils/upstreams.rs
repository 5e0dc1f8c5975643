#![cfg(test)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// TCP upstream that echoes everything back on every connection.
pub struct EchoUpstream {
    addr: SocketAddr,
}

impl EchoUpstream {
    pub async fn start(port: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut socket, _)) => {
                        tokio::spawn(async move {
                            let mut buf = [0u8; 4096];
                            loop {
                                match socket.read(&mut buf).await {
                                    Ok(0) | Err(_) => break,
                                    Ok(n) => {
                                        if socket.write_all(&buf[..n]).await.is_err() {
                                            break;
                                        }
                                    }
                                }
                            }
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self { addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// TCP upstream that writes a fixed payload immediately on accept, then
/// holds the connection open until the peer closes it.
pub struct BurstUpstream {
    addr: SocketAddr,
}

impl BurstUpstream {
    pub async fn start(port: u16, payload: Vec<u8>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut socket, _)) => {
                        let payload = payload.clone();
                        tokio::spawn(async move {
                            if socket.write_all(&payload).await.is_err() {
                                return;
                            }
                            let mut sink = [0u8; 1024];
                            loop {
                                match socket.read(&mut sink).await {
                                    Ok(0) | Err(_) => break,
                                    Ok(_) => continue,
                                }
                            }
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self { addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// TCP upstream that accepts one connection, records every byte it
/// receives, and flags when the peer closes.
pub struct RecordingUpstream {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<u8>>>,
    closed: Arc<AtomicBool>,
}

impl RecordingUpstream {
    pub async fn start(port: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        let addr = listener.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let received_writer = received.clone();
        let closed_writer = closed.clone();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => received_writer.lock().unwrap().extend_from_slice(&buf[..n]),
                    }
                }
                closed_writer.store(true, Ordering::SeqCst);
            }
        });

        Ok(Self {
            addr,
            received,
            closed,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<u8> {
        self.received.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#![cfg(test)]
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod recording_logger;
pub mod relay_server;
pub mod upstreams;
pub mod ws_client;

pub use recording_logger::RecordingLogger;
pub use relay_server::TestRelayServer;
pub use upstreams::{BurstUpstream, EchoUpstream, RecordingUpstream};
pub use ws_client::{connect_with_origin, connect_without_origin, WsClient};

//! Per-connection bidirectional relay engine.
//!
//! A relay couples one WebSocket connection with one upstream TCP
//! connection. The supervisor owns the pair and runs two forwarders, one
//! per direction; bytes are relayed opaquely. TCP is a byte stream and
//! the WebSocket is message-framed, so each TCP read becomes exactly one
//! binary message, while received message payloads are written to TCP as
//! contiguous byte ranges. Both forwarders poll their reads on a short
//! deadline so a blocked read observes cancellation within one interval.

mod forward;
mod supervisor;

pub use supervisor::RelaySupervisor;

use std::time::Duration;

/// Read-deadline granularity; worst-case shutdown latency per forwarder.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long teardown waits for the forwarders to exit on their own
/// before force-closing both endpoints. Reads are bounded by the poll
/// interval; a forwarder stalled in a write is only freed by the close.
pub(crate) const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Upstream read buffer; also the upper bound on relayed message size.
pub(crate) const TCP_READ_BUFFER: usize = 1024;

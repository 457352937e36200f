use thiserror::Error;

use crate::protocol::RequestFrame;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("channel closed")]
    Closed,
    #[error("send failed: {0}")]
    Send(String),
}

/// Outbound seam to the gateway channel. `send` enqueues a request frame
/// without waiting for delivery; responses come back later through
/// [`crate::shell::Shell::handle_frame`], correlated by request id.
///
/// Implementations wrap whatever channel the host maintains (a websocket
/// writer, an IPC pipe). Failures are non-fatal to the caller: the affected
/// window simply stays unbound from sync.
pub trait SurfaceTransport {
    fn send(&mut self, frame: RequestFrame) -> Result<(), TransportError>;
}

/// In-memory transport that records every frame. Used by the test suite and
/// handy for hosts that batch outbound frames themselves.
impl SurfaceTransport for Vec<RequestFrame> {
    fn send(&mut self, frame: RequestFrame) -> Result<(), TransportError> {
        self.push(frame);
        Ok(())
    }
}

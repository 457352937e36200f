//! Cross-client surface synchronization: the mapping between local windows
//! and shared gateway-held surface records.

mod client;
mod transport;

pub use client::SurfaceSyncClient;
pub use transport::{SurfaceTransport, TransportError};

//! Multi-window desktop shell engine with cross-client surface sync.
//!
//! The engine is headless: a host embeds [`shell::Shell`], routes pointer
//! and viewport events into it, hands it every frame arriving on the
//! gateway channel, and paints the draw list it exposes. Windows a client
//! opens are shared as gateway-held "surfaces" and mirrored, live, on every
//! other client connected to the same gateway.

pub mod commands;
pub mod constants;
pub mod interaction;
pub mod layout;
pub mod protocol;
pub mod shell;
pub mod sync;
pub mod tracing_sub;
pub mod window;

pub use commands::{CommandAction, CommandEntry, CommandPalette, Launchable};
pub use interaction::{Interaction, InteractionController, InteractionKind};
pub use layout::{Rect, ResizeEdge, SnapZone};
pub use shell::{Shell, ThemeMode};
pub use sync::{SurfaceSyncClient, SurfaceTransport, TransportError};
pub use window::{Binding, OpenDisposition, SnapEdge, Window, WindowId, WindowStore, WindowView};

//! Local window entities and the store that owns them.

mod store;

pub use store::{OpenDisposition, WindowStore, WindowView};

use crate::layout::Rect;
use crate::protocol::SurfaceKind;

/// Locally unique window handle. Ids are assigned from a monotonic counter
/// and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

/// Which screen edge a window is currently docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapEdge {
    Left,
    Right,
}

/// Relationship between a local window and the shared surface registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Purely local; excluded from sync entirely (never opened remotely, or
    /// the open call was rejected).
    Local,
    /// A `surface.open` call is in flight; the window participates in the
    /// pending-open duplicate suppression until the response arrives.
    Pending,
    /// Bound to a shared surface.
    Bound(String),
}

impl Binding {
    pub fn surface_id(&self) -> Option<&str> {
        match self {
            Binding::Bound(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Window {
    pub id: WindowId,
    pub kind: SurfaceKind,
    pub content_ref: String,
    pub label: Option<String>,
    pub rect: Rect,
    pub z_order: u64,
    pub minimized: bool,
    pub maximized: bool,
    pub snap_edge: Option<SnapEdge>,
    /// Geometry to restore when leaving the maximized or snapped state.
    pub restore_rect: Option<Rect>,
    pub binding: Binding,
}

impl Window {
    pub fn surface_id(&self) -> Option<&str> {
        self.binding.surface_id()
    }

    /// True while the window sits in snapped or maximized geometry, i.e.
    /// `rect` is not its free-floating rectangle.
    pub fn is_docked(&self) -> bool {
        self.maximized || self.snap_edge.is_some()
    }
}

//! Shared crate-wide constants.

/// Minimum width (in viewport pixels) a window may shrink to, whether by
/// resize drag, clamping, or remote rect adoption.
pub const MIN_WINDOW_WIDTH: u32 = 240;

/// Minimum height (in viewport pixels) a window may shrink to.
pub const MIN_WINDOW_HEIGHT: u32 = 160;

/// Inset subtracted from the viewport dimensions when clamping a window's
/// size, so a clamped window never covers the viewport edge-to-edge and the
/// user can always reach the desktop behind it. Maximized windows bypass
/// clamping and do fill the viewport.
pub const CLAMP_MARGIN: u32 = 16;

/// Horizontal distance (in pixels) from the left/right viewport edge within
/// which a dragged pointer arms the half-screen snap zone for that side.
pub const SNAP_SIDE_THRESHOLD: i32 = 28;

/// Vertical distance (in pixels) from the top viewport edge within which a
/// dragged pointer arms the maximize snap zone. Top takes priority over the
/// side zones when both match.
pub const SNAP_TOP_THRESHOLD: i32 = 12;

/// Default size for windows opened without an explicit rectangle.
pub const DEFAULT_WINDOW_WIDTH: u32 = 640;

/// See [`DEFAULT_WINDOW_WIDTH`].
pub const DEFAULT_WINDOW_HEIGHT: u32 = 420;

/// Offset applied per already-open window when placing a new one, so
/// freshly opened windows cascade instead of stacking exactly.
pub const CASCADE_STEP: i32 = 32;

/// Number of cascade steps before placement wraps back to the origin.
pub const CASCADE_WRAP: i32 = 8;

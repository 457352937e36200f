//! Pure geometry for the shell: rectangles, clamping, resize, snap zones.
//!
//! Nothing in this module holds state; every function is total over its
//! inputs so callers never need an error path for bad geometry.

mod resize;
mod snap;

pub use resize::{ResizeEdge, resize};
pub use snap::{SnapZone, snap_rect_for, snap_zone_at};

use crate::constants::{CLAMP_MARGIN, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

/// Axis-aligned rectangle in viewport pixels. Origin may sit anywhere inside
/// the viewport; sizes are unsigned and floored at the window minimums by
/// [`clamp`] and [`resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Fits `rect` inside `bounds`: the size is shrunk to the bounds minus
/// [`CLAMP_MARGIN`] and floored at the minimum window size, then the origin
/// is moved the least distance that keeps the rectangle fully inside.
///
/// Idempotent: `clamp(clamp(r, b), b) == clamp(r, b)`.
pub fn clamp(rect: Rect, bounds: Rect) -> Rect {
    let max_w = bounds
        .width
        .saturating_sub(CLAMP_MARGIN)
        .max(MIN_WINDOW_WIDTH);
    let max_h = bounds
        .height
        .saturating_sub(CLAMP_MARGIN)
        .max(MIN_WINDOW_HEIGHT);
    let width = rect.width.clamp(MIN_WINDOW_WIDTH, max_w);
    let height = rect.height.clamp(MIN_WINDOW_HEIGHT, max_h);

    let max_x = bounds.x + (bounds.width as i32 - width as i32).max(0);
    let max_y = bounds.y + (bounds.height as i32 - height as i32).max(0);
    let x = rect.x.clamp(bounds.x, max_x);
    let y = rect.y.clamp(bounds.y, max_y);

    Rect {
        x,
        y,
        width,
        height,
    }
}

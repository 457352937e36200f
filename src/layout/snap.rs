use super::Rect;
use crate::constants::{SNAP_SIDE_THRESHOLD, SNAP_TOP_THRESHOLD};

/// Screen regions a dragged window can dock to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapZone {
    /// Full viewport (maximize).
    Top,
    /// Left half of the viewport.
    Left,
    /// Right half of the viewport.
    Right,
}

/// Returns the snap zone armed by a pointer at `(x, y)`, if any.
///
/// Top takes priority over the side zones when the pointer sits in a corner.
pub fn snap_zone_at(x: i32, y: i32, bounds: Rect) -> Option<SnapZone> {
    if y - bounds.y <= SNAP_TOP_THRESHOLD {
        return Some(SnapZone::Top);
    }
    if x - bounds.x <= SNAP_SIDE_THRESHOLD {
        return Some(SnapZone::Left);
    }
    if bounds.right() - x <= SNAP_SIDE_THRESHOLD {
        return Some(SnapZone::Right);
    }
    None
}

/// The rectangle a window settles into when snapped to `zone`.
pub fn snap_rect_for(zone: SnapZone, bounds: Rect) -> Rect {
    let half = bounds.width / 2;
    match zone {
        SnapZone::Top => bounds,
        SnapZone::Left => Rect {
            width: half,
            ..bounds
        },
        SnapZone::Right => Rect {
            x: bounds.x + half as i32,
            width: bounds.width - half,
            ..bounds
        },
    }
}

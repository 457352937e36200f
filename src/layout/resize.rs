use super::{Rect, clamp};
use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

/// One of the eight compass-direction resize handles on a window border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthWest | Self::NorthEast)
    }

    fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthWest | Self::SouthEast)
    }
}

/// Applies a resize drag of `(dx, dy)` pixels from `edge` to `start`.
///
/// Each axis is adjusted independently; north/west handles also move the
/// origin. When a dimension would drop below the minimum, the moving edge is
/// pinned so the opposite edge never crosses the minimum-size threshold. The
/// result is re-clamped to `bounds`.
pub fn resize(start: Rect, edge: ResizeEdge, dx: i32, dy: i32, bounds: Rect) -> Rect {
    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width as i32;
    let mut height = start.height as i32;

    if edge.moves_west() {
        x += dx;
        width -= dx;
    } else if edge.moves_east() {
        width += dx;
    }
    if edge.moves_north() {
        y += dy;
        height -= dy;
    } else if edge.moves_south() {
        height += dy;
    }

    let min_w = MIN_WINDOW_WIDTH as i32;
    let min_h = MIN_WINDOW_HEIGHT as i32;
    if width < min_w {
        if edge.moves_west() {
            x -= min_w - width;
        }
        width = min_w;
    }
    if height < min_h {
        if edge.moves_north() {
            y -= min_h - height;
        }
        height = min_h;
    }

    clamp(
        Rect {
            x,
            y,
            width: width as u32,
            height: height as u32,
        },
        bounds,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0, 0, 1000, 700);

    #[test]
    fn resize_east_grows_width_only() {
        let start = Rect::new(100, 100, 300, 250);
        let result = resize(start, ResizeEdge::East, 40, 99, BOUNDS);
        assert_eq!(result, Rect::new(100, 100, 340, 250));
    }

    #[test]
    fn resize_north_moves_origin_and_height() {
        let start = Rect::new(100, 200, 300, 250);
        let result = resize(start, ResizeEdge::North, 99, -50, BOUNDS);
        assert_eq!(result, Rect::new(100, 150, 300, 300));
    }

    #[test]
    fn resize_never_crosses_min_size() {
        let start = Rect::new(100, 100, 300, 250);
        // Drag the west edge far past the east edge.
        let result = resize(start, ResizeEdge::West, 10_000, 0, BOUNDS);
        assert_eq!(result.width, MIN_WINDOW_WIDTH);
        // The east edge stayed put.
        assert_eq!(result.right(), start.right());
    }

    #[test]
    fn resize_corner_pins_both_opposite_edges() {
        let start = Rect::new(200, 200, 300, 250);
        let result = resize(start, ResizeEdge::NorthWest, 10_000, 10_000, BOUNDS);
        assert_eq!(result.width, MIN_WINDOW_WIDTH);
        assert_eq!(result.height, MIN_WINDOW_HEIGHT);
        assert_eq!(result.right(), start.right());
        assert_eq!(result.bottom(), start.bottom());
    }

    #[test]
    fn resize_result_stays_in_bounds() {
        let start = Rect::new(800, 500, 300, 250);
        let result = resize(start, ResizeEdge::SouthEast, 5000, 5000, BOUNDS);
        assert!(result.right() <= BOUNDS.right());
        assert!(result.bottom() <= BOUNDS.bottom());
    }
}

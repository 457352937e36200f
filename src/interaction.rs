//! Pointer interaction state machine: at most one drag-or-resize operation
//! is active globally, held in a single `Option<Interaction>` slot. Every
//! transition is a function of the current slot and one pointer event, so
//! the machine tests without real pointer hardware.

use crate::layout::{Rect, ResizeEdge, SnapZone, clamp, resize, snap_rect_for, snap_zone_at};
use crate::window::{WindowId, WindowStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Drag,
    Resize(ResizeEdge),
}

/// The active operation. Captured once on press; movement deltas are always
/// measured against the start pointer and start rect, never incrementally.
#[derive(Debug, Clone, Copy)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub window_id: WindowId,
    pub start_pointer: (i32, i32),
    pub start_rect: Rect,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    active: Option<Interaction>,
    snap_preview: Option<SnapZone>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Interaction> {
        self.active.as_ref()
    }

    /// Snap zone the pointer is currently hovering during a drag. Visual
    /// preview only; nothing is mutated until release.
    pub fn snap_preview(&self) -> Option<SnapZone> {
        self.snap_preview
    }

    /// Preview rectangle for the armed snap zone, for the host to paint.
    pub fn snap_preview_rect(&self, bounds: Rect) -> Option<Rect> {
        self.snap_preview.map(|zone| snap_rect_for(zone, bounds))
    }

    /// Primary-button press on a window's title region. Focuses the window
    /// and begins a drag; a snapped or maximized window is restored to its
    /// saved geometry first so it is never dragged while docked. Ignored
    /// while another interaction is active.
    pub fn begin_drag(&mut self, store: &mut WindowStore, id: WindowId, x: i32, y: i32) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(start_rect) = store.prepare_drag(id) else {
            return false;
        };
        store.focus(id);
        self.active = Some(Interaction {
            kind: InteractionKind::Drag,
            window_id: id,
            start_pointer: (x, y),
            start_rect,
        });
        true
    }

    /// Primary-button press on one of the eight resize handles. Ignored
    /// while another interaction is active and for maximized windows.
    pub fn begin_resize(
        &mut self,
        store: &mut WindowStore,
        id: WindowId,
        edge: ResizeEdge,
        x: i32,
        y: i32,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(win) = store.window(id) else {
            return false;
        };
        if win.maximized {
            return false;
        }
        let start_rect = win.rect;
        store.focus(id);
        self.active = Some(Interaction {
            kind: InteractionKind::Resize(edge),
            window_id: id,
            start_pointer: (x, y),
            start_rect,
        });
        true
    }

    /// Movement tick: recomputes the in-progress rect from the start state
    /// and, during drags, the snap preview under the pointer.
    pub fn pointer_move(&mut self, store: &mut WindowStore, x: i32, y: i32) {
        let Some(interaction) = self.active else {
            return;
        };
        let bounds = store.bounds();
        let dx = x - interaction.start_pointer.0;
        let dy = y - interaction.start_pointer.1;
        match interaction.kind {
            InteractionKind::Drag => {
                let moved = Rect {
                    x: interaction.start_rect.x + dx,
                    y: interaction.start_rect.y + dy,
                    ..interaction.start_rect
                };
                store.set_rect(interaction.window_id, clamp(moved, bounds));
                self.snap_preview = snap_zone_at(x, y, bounds);
            }
            InteractionKind::Resize(edge) => {
                store.set_rect(
                    interaction.window_id,
                    resize(interaction.start_rect, edge, dx, dy, bounds),
                );
            }
        }
    }

    /// Release: a drag that ends inside a snap zone settles into it,
    /// otherwise the last rect stands. Returns the window whose geometry
    /// settled, or `None` when no interaction was active.
    pub fn pointer_up(&mut self, store: &mut WindowStore) -> Option<WindowId> {
        let interaction = self.active.take()?;
        let zone = self.snap_preview.take();
        if interaction.kind == InteractionKind::Drag
            && let Some(zone) = zone
        {
            store.snap(interaction.window_id, zone);
        }
        Some(interaction.window_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SurfaceKind;
    use crate::window::OpenDisposition;

    const BOUNDS: Rect = Rect::new(0, 0, 1000, 700);

    fn store_with_window() -> (WindowStore, WindowId) {
        let mut store = WindowStore::new(BOUNDS);
        let (id, _) = store.open(SurfaceKind::App, "chat", None, OpenDisposition::Reuse);
        (store, id)
    }

    #[test]
    fn second_press_is_ignored_until_release() {
        let (mut store, id) = store_with_window();
        let (other, _) = store.open(SurfaceKind::App, "nodes", None, OpenDisposition::Reuse);
        let mut controller = InteractionController::new();
        assert!(controller.begin_drag(&mut store, id, 100, 100));
        assert!(!controller.begin_drag(&mut store, other, 200, 200));
        assert!(!controller.begin_resize(&mut store, other, ResizeEdge::East, 200, 200));
        controller.pointer_up(&mut store);
        assert!(controller.begin_drag(&mut store, other, 200, 200));
    }

    #[test]
    fn drag_moves_by_pointer_delta() {
        let (mut store, id) = store_with_window();
        let start = store.window(id).unwrap().rect;
        let mut controller = InteractionController::new();
        controller.begin_drag(&mut store, id, 100, 100);
        controller.pointer_move(&mut store, 140, 160);
        let rect = store.window(id).unwrap().rect;
        assert_eq!(rect.x, start.x + 40);
        assert_eq!(rect.y, start.y + 60);
        assert_eq!(controller.pointer_up(&mut store), Some(id));
    }

    #[test]
    fn release_without_interaction_is_noop() {
        let (mut store, _) = store_with_window();
        let mut controller = InteractionController::new();
        assert_eq!(controller.pointer_up(&mut store), None);
        controller.pointer_move(&mut store, 10, 10);
    }

    #[test]
    fn preview_is_visual_only_until_release() {
        let (mut store, id) = store_with_window();
        let mut controller = InteractionController::new();
        controller.begin_drag(&mut store, id, 400, 300);
        controller.pointer_move(&mut store, 10, 300);
        assert_eq!(controller.snap_preview(), Some(SnapZone::Left));
        assert_eq!(
            controller.snap_preview_rect(BOUNDS),
            Some(Rect::new(0, 0, 500, 700))
        );
        // Still mid-drag: the window is not snapped yet.
        assert!(store.window(id).unwrap().snap_edge.is_none());
        controller.pointer_up(&mut store);
        assert_eq!(store.window(id).unwrap().rect, Rect::new(0, 0, 500, 700));
        assert!(controller.snap_preview().is_none());
    }

    #[test]
    fn drag_of_maximized_window_restores_first() {
        let (mut store, id) = store_with_window();
        let before = store.window(id).unwrap().rect;
        store.toggle_maximize(id);
        let mut controller = InteractionController::new();
        controller.begin_drag(&mut store, id, 500, 350);
        let win = store.window(id).unwrap();
        assert!(!win.maximized);
        assert_eq!(win.rect, before);
    }
}

use std::collections::BTreeMap;

use super::{Binding, SnapEdge, Window, WindowId};
use crate::constants::{CASCADE_STEP, CASCADE_WRAP, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::layout::{Rect, SnapZone, clamp, snap_rect_for};
use crate::protocol::SurfaceKind;

/// Whether `open` may reuse an existing window for the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenDisposition {
    /// Focus (and un-minimize) an existing window for the content ref when
    /// one exists; otherwise create one.
    Reuse,
    /// Always create a fresh window.
    NewInstance,
}

/// Snapshot of one window for the rendering host.
#[derive(Debug, Clone)]
pub struct WindowView {
    pub id: WindowId,
    pub kind: SurfaceKind,
    pub content_ref: String,
    pub label: Option<String>,
    pub rect: Rect,
    pub z_order: u64,
    pub focused: bool,
}

/// The authoritative local collection of windows.
///
/// Single-owner mutable state: the interaction controller and the sync
/// client both mutate windows exclusively through these operations, so the
/// focus and geometry invariants are enforced in one place.
#[derive(Debug)]
pub struct WindowStore {
    windows: BTreeMap<WindowId, Window>,
    bounds: Rect,
    focused: Option<WindowId>,
    next_id: u64,
    z_counter: u64,
    opened_count: u64,
}

impl WindowStore {
    pub fn new(bounds: Rect) -> Self {
        Self {
            windows: BTreeMap::new(),
            bounds,
            focused: None,
            next_id: 0,
            z_counter: 0,
            opened_count: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Highest-z window for `content_ref`, minimized or not.
    pub fn find_by_content(&self, content_ref: &str) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|win| win.content_ref == content_ref)
            .max_by_key(|win| win.z_order)
            .map(|win| win.id)
    }

    pub fn find_by_surface(&self, surface_id: &str) -> Option<WindowId> {
        self.windows
            .values()
            .find(|win| win.surface_id() == Some(surface_id))
            .map(|win| win.id)
    }

    /// True while any open call for `content_ref` is still unresolved.
    pub fn has_pending_for(&self, content_ref: &str) -> bool {
        self.windows
            .values()
            .any(|win| win.binding == Binding::Pending && win.content_ref == content_ref)
    }

    /// Opens a window for `content_ref`, or focuses the existing one under
    /// [`OpenDisposition::Reuse`]. Returns the id and whether a window was
    /// actually created.
    pub fn open(
        &mut self,
        kind: SurfaceKind,
        content_ref: &str,
        label: Option<String>,
        disposition: OpenDisposition,
    ) -> (WindowId, bool) {
        if disposition == OpenDisposition::Reuse
            && let Some(existing) = self.find_by_content(content_ref)
        {
            if self.windows[&existing].minimized {
                self.restore_from_minimized(existing);
            } else {
                self.focus(existing);
            }
            return (existing, false);
        }

        let id = self.allocate_id();
        let rect = self.next_placement();
        let z_order = self.bump_z();
        self.windows.insert(
            id,
            Window {
                id,
                kind,
                content_ref: content_ref.to_string(),
                label,
                rect,
                z_order,
                minimized: false,
                maximized: false,
                snap_edge: None,
                restore_rect: None,
                binding: Binding::Local,
            },
        );
        self.focused = Some(id);
        tracing::debug!(?id, content_ref, "opened window");
        (id, true)
    }

    /// Materializes a window for a remotely created surface. Joins the top
    /// of the z-order but does not steal local focus, unless nothing is
    /// focused.
    pub fn adopt(
        &mut self,
        surface_id: &str,
        kind: SurfaceKind,
        content_ref: &str,
        label: Option<String>,
        rect: Option<Rect>,
        minimized: bool,
    ) -> WindowId {
        let id = self.allocate_id();
        let rect = match rect {
            Some(rect) => clamp(rect, self.bounds),
            None => self.next_placement(),
        };
        let z_order = self.bump_z();
        self.windows.insert(
            id,
            Window {
                id,
                kind,
                content_ref: content_ref.to_string(),
                label,
                rect,
                z_order,
                minimized,
                maximized: false,
                snap_edge: None,
                restore_rect: None,
                binding: Binding::Bound(surface_id.to_string()),
            },
        );
        if self.focused.is_none() && !minimized {
            self.focused = Some(id);
        }
        tracing::debug!(?id, surface_id, content_ref, "adopted remote window");
        id
    }

    pub fn close(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_none() {
            return;
        }
        tracing::debug!(?id, "closed window");
        if self.focused == Some(id) {
            self.focused = self.top_non_minimized();
            if let Some(next) = self.focused {
                self.raise(next);
            }
        }
    }

    pub fn focus(&mut self, id: WindowId) {
        let Some(win) = self.windows.get(&id) else {
            return;
        };
        if win.minimized {
            tracing::debug!(?id, "ignored focus of minimized window");
            return;
        }
        self.focused = Some(id);
        self.raise(id);
    }

    pub fn minimize(&mut self, id: WindowId) {
        let Some(win) = self.windows.get_mut(&id) else {
            return;
        };
        if win.minimized {
            return;
        }
        win.minimized = true;
        if self.focused == Some(id) {
            self.focused = self.top_non_minimized();
            if let Some(next) = self.focused {
                self.raise(next);
            }
        }
    }

    pub fn restore_from_minimized(&mut self, id: WindowId) {
        let Some(win) = self.windows.get_mut(&id) else {
            return;
        };
        win.minimized = false;
        self.focus(id);
    }

    /// Remote-driven minimize/restore: adjusts the flag without stealing
    /// focus, while keeping the "exactly one focused if any non-minimized
    /// exists" invariant.
    pub fn set_minimized_remote(&mut self, id: WindowId, minimized: bool) {
        if minimized {
            self.minimize(id);
            return;
        }
        let Some(win) = self.windows.get_mut(&id) else {
            return;
        };
        win.minimized = false;
        if self.focused.is_none() {
            self.focused = Some(id);
            self.raise(id);
        }
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        let bounds = self.bounds;
        let Some(win) = self.windows.get_mut(&id) else {
            return;
        };
        if win.maximized {
            let restore = win.restore_rect.take().unwrap_or(win.rect);
            win.maximized = false;
            win.rect = clamp(restore, bounds);
        } else {
            if win.restore_rect.is_none() {
                win.restore_rect = Some(win.rect);
            }
            win.snap_edge = None;
            win.maximized = true;
            win.rect = bounds;
        }
    }

    pub fn snap(&mut self, id: WindowId, zone: SnapZone) {
        // Snapping to the top zone is maximization.
        if zone == SnapZone::Top {
            let already = self.windows.get(&id).is_none_or(|win| win.maximized);
            if !already {
                self.toggle_maximize(id);
            }
            return;
        }
        let bounds = self.bounds;
        let Some(win) = self.windows.get_mut(&id) else {
            return;
        };
        if win.restore_rect.is_none() {
            win.restore_rect = Some(win.rect);
        }
        win.maximized = false;
        win.snap_edge = Some(match zone {
            SnapZone::Left => SnapEdge::Left,
            _ => SnapEdge::Right,
        });
        win.rect = snap_rect_for(zone, bounds);
    }

    /// Leaves snapped/maximized geometry before a drag begins, restoring the
    /// saved rectangle. Returns the rect the drag starts from.
    pub fn prepare_drag(&mut self, id: WindowId) -> Option<Rect> {
        let bounds = self.bounds;
        let win = self.windows.get_mut(&id)?;
        if win.is_docked() {
            let restore = win.restore_rect.take().unwrap_or(win.rect);
            win.maximized = false;
            win.snap_edge = None;
            win.rect = clamp(restore, bounds);
        }
        Some(win.rect)
    }

    /// In-progress geometry write from an interaction tick. The caller is
    /// expected to pass already-clamped rectangles.
    pub fn set_rect(&mut self, id: WindowId, rect: Rect) {
        if let Some(win) = self.windows.get_mut(&id) {
            win.rect = rect;
        }
    }

    pub fn set_binding(&mut self, id: WindowId, binding: Binding) {
        if let Some(win) = self.windows.get_mut(&id) {
            win.binding = binding;
        }
    }

    /// Re-fits every window after the viewport changes: maximized windows
    /// track the new bounds, snapped windows recompute their half, the rest
    /// are re-clamped (a no-op when they already fit).
    pub fn set_viewport(&mut self, bounds: Rect) {
        self.bounds = bounds;
        for win in self.windows.values_mut() {
            if win.maximized {
                win.rect = bounds;
            } else if let Some(edge) = win.snap_edge {
                let zone = match edge {
                    SnapEdge::Left => SnapZone::Left,
                    SnapEdge::Right => SnapZone::Right,
                };
                win.rect = snap_rect_for(zone, bounds);
            } else {
                win.rect = clamp(win.rect, bounds);
            }
        }
    }

    /// Visible windows in paint order (ascending z; topmost last).
    pub fn draw_list(&self) -> Vec<WindowView> {
        let mut views: Vec<WindowView> = self
            .windows
            .values()
            .filter(|win| !win.minimized)
            .map(|win| WindowView {
                id: win.id,
                kind: win.kind,
                content_ref: win.content_ref.clone(),
                label: win.label.clone(),
                rect: win.rect,
                z_order: win.z_order,
                focused: self.focused == Some(win.id),
            })
            .collect();
        views.sort_by_key(|view| view.z_order);
        views
    }

    fn allocate_id(&mut self) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        id
    }

    fn bump_z(&mut self) -> u64 {
        self.z_counter += 1;
        self.z_counter
    }

    fn raise(&mut self, id: WindowId) {
        let z = self.bump_z();
        if let Some(win) = self.windows.get_mut(&id) {
            win.z_order = z;
        }
    }

    fn top_non_minimized(&self) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|win| !win.minimized)
            .max_by_key(|win| win.z_order)
            .map(|win| win.id)
    }

    fn next_placement(&mut self) -> Rect {
        let step = (self.opened_count as i32 % CASCADE_WRAP) * CASCADE_STEP;
        self.opened_count += 1;
        clamp(
            Rect {
                x: self.bounds.x + CASCADE_STEP + step,
                y: self.bounds.y + CASCADE_STEP + step,
                width: DEFAULT_WINDOW_WIDTH,
                height: DEFAULT_WINDOW_HEIGHT,
            },
            self.bounds,
        )
    }
}

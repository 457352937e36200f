use shell_wm::interaction::InteractionController;
use shell_wm::layout::{Rect, ResizeEdge, SnapZone};
use shell_wm::protocol::SurfaceKind;
use shell_wm::window::{OpenDisposition, WindowStore};

const BOUNDS: Rect = Rect::new(0, 0, 1000, 700);

fn store_with_window() -> (WindowStore, shell_wm::window::WindowId) {
    let mut store = WindowStore::new(BOUNDS);
    let (id, _) = store.open(SurfaceKind::App, "chat", None, OpenDisposition::Reuse);
    (store, id)
}

#[test]
fn drag_into_left_zone_settles_to_half_screen() {
    let (mut store, id) = store_with_window();
    let mut controller = InteractionController::new();
    assert!(controller.begin_drag(&mut store, id, 400, 300));
    // Drag the pointer to the left edge of the viewport.
    controller.pointer_move(&mut store, 28, 300);
    assert_eq!(controller.snap_preview(), Some(SnapZone::Left));
    controller.pointer_up(&mut store);
    assert_eq!(store.window(id).unwrap().rect, Rect::new(0, 0, 500, 700));
    assert!(store.window(id).unwrap().snap_edge.is_some());
}

#[test]
fn drag_released_outside_zone_keeps_settled_rect() {
    let (mut store, id) = store_with_window();
    let start = store.window(id).unwrap().rect;
    let mut controller = InteractionController::new();
    controller.begin_drag(&mut store, id, 400, 300);
    controller.pointer_move(&mut store, 460, 380);
    controller.pointer_up(&mut store);
    let rect = store.window(id).unwrap().rect;
    assert_eq!(rect, Rect::new(start.x + 60, start.y + 80, start.width, start.height));
    assert!(store.window(id).unwrap().snap_edge.is_none());
}

#[test]
fn drag_to_top_maximizes_on_release() {
    let (mut store, id) = store_with_window();
    let before = store.window(id).unwrap().rect;
    let mut controller = InteractionController::new();
    controller.begin_drag(&mut store, id, 400, 300);
    controller.pointer_move(&mut store, 500, 4);
    assert_eq!(controller.snap_preview(), Some(SnapZone::Top));
    controller.pointer_up(&mut store);
    let win = store.window(id).unwrap();
    assert!(win.maximized);
    assert_eq!(win.rect, BOUNDS);
    // restore_rect points at where the drag left the window, so leaving the
    // maximized state brings it back there.
    assert!(win.restore_rect.is_some());
    store.toggle_maximize(id);
    let rect = store.window(id).unwrap().rect;
    assert_eq!(rect.width, before.width);
    assert_eq!(rect.height, before.height);
}

#[test]
fn resize_drag_respects_min_size_and_bounds() {
    let (mut store, id) = store_with_window();
    let start = store.window(id).unwrap().rect;
    let mut controller = InteractionController::new();
    assert!(controller.begin_resize(&mut store, id, ResizeEdge::SouthEast, start.right(), start.bottom()));
    // Collapse far past the opposite corner.
    controller.pointer_move(&mut store, start.x - 5000, start.y - 5000);
    controller.pointer_up(&mut store);
    let rect = store.window(id).unwrap().rect;
    assert_eq!(rect.width, shell_wm::constants::MIN_WINDOW_WIDTH);
    assert_eq!(rect.height, shell_wm::constants::MIN_WINDOW_HEIGHT);
    // Origin never moved: the south-east handle leaves the north-west
    // corner pinned.
    assert_eq!((rect.x, rect.y), (start.x, start.y));
}

#[test]
fn only_one_interaction_at_a_time() {
    let (mut store, a) = store_with_window();
    let (b, _) = store.open(SurfaceKind::App, "nodes", None, OpenDisposition::Reuse);
    let mut controller = InteractionController::new();
    assert!(controller.begin_resize(&mut store, a, ResizeEdge::East, 500, 300));
    assert!(!controller.begin_drag(&mut store, b, 100, 100));
    assert_eq!(controller.active().unwrap().window_id, a);
    controller.pointer_up(&mut store);
    assert!(controller.active().is_none());
}

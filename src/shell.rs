//! The shell facade: single owner of the window store, wiring the
//! interaction controller and the sync client through one set of mutation
//! points. Hosts construct a [`Shell`], feed it pointer/viewport/transport
//! events, and paint [`Shell::draw_list`].

use crate::commands::{CommandAction, CommandEntry, CommandPalette, Launchable, build_entries};
use crate::interaction::InteractionController;
use crate::layout::{Rect, ResizeEdge, SnapZone};
use crate::protocol::{EVENT_SURFACE_SNAPSHOT, Frame, SurfaceKind, SurfaceSnapshotPayload};
use crate::sync::{SurfaceSyncClient, SurfaceTransport};
use crate::window::{OpenDisposition, WindowId, WindowStore, WindowView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

pub struct Shell<T: SurfaceTransport> {
    store: WindowStore,
    interaction: InteractionController,
    sync: SurfaceSyncClient<T>,
    palette: CommandPalette,
    catalog: Vec<Launchable>,
    theme: ThemeMode,
    disconnect_requested: bool,
}

impl<T: SurfaceTransport> Shell<T> {
    pub fn new(bounds: Rect, catalog: Vec<Launchable>, transport: T) -> Self {
        Self {
            store: WindowStore::new(bounds),
            interaction: InteractionController::new(),
            sync: SurfaceSyncClient::new(transport),
            palette: CommandPalette::new(),
            catalog,
            theme: ThemeMode::Dark,
            disconnect_requested: false,
        }
    }

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    pub fn sync(&self) -> &SurfaceSyncClient<T> {
        &self.sync
    }

    /// Direct access to the outbound channel, for hosts that flush queued
    /// frames themselves.
    pub fn transport_mut(&mut self) -> &mut T {
        self.sync.transport_mut()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// True once after a disconnect command; consuming it resets the flag.
    pub fn take_disconnect_request(&mut self) -> bool {
        std::mem::take(&mut self.disconnect_requested)
    }

    // ── Window operations ──

    /// Opens (or, under [`OpenDisposition::Reuse`], focuses) an app pane.
    /// Only catalog content refs are accepted.
    pub fn open_app(
        &mut self,
        content_ref: &str,
        disposition: OpenDisposition,
    ) -> Option<WindowId> {
        let launchable = self
            .catalog
            .iter()
            .find(|launchable| launchable.content_ref == content_ref)?;
        let label = Some(launchable.label.clone());
        let (id, created) = self
            .store
            .open(SurfaceKind::App, content_ref, label, disposition);
        if created {
            self.sync.open_surface(&mut self.store, id);
        } else {
            self.sync.push_focus(&self.store, id);
            self.sync.push_update(&self.store, id);
        }
        Some(id)
    }

    /// Opens embedded web content in a window labeled with its URL.
    pub fn open_url(&mut self, url: &str, disposition: OpenDisposition) -> WindowId {
        let (id, created) =
            self.store
                .open(SurfaceKind::Webview, url, Some(url.to_string()), disposition);
        if created {
            self.sync.open_surface(&mut self.store, id);
        } else {
            self.sync.push_focus(&self.store, id);
        }
        id
    }

    pub fn close(&mut self, id: WindowId) {
        let Some(binding) = self.store.window(id).map(|win| win.binding.clone()) else {
            return;
        };
        self.store.close(id);
        self.sync.note_closed(&binding);
    }

    pub fn minimize(&mut self, id: WindowId) {
        self.store.minimize(id);
        self.sync.push_update(&self.store, id);
    }

    pub fn restore_from_minimized(&mut self, id: WindowId) {
        self.store.restore_from_minimized(id);
        self.sync.push_update(&self.store, id);
        self.sync.push_focus(&self.store, id);
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        self.store.toggle_maximize(id);
        self.sync.push_update(&self.store, id);
    }

    pub fn snap(&mut self, id: WindowId, zone: SnapZone) {
        self.store.snap(id, zone);
        self.sync.push_update(&self.store, id);
    }

    pub fn focus(&mut self, id: WindowId) {
        self.store.focus(id);
        self.sync.push_update(&self.store, id);
        self.sync.push_focus(&self.store, id);
    }

    /// Host viewport changed; re-fit everything and let other clients see
    /// the resulting geometry.
    pub fn viewport_resized(&mut self, bounds: Rect) {
        self.store.set_viewport(bounds);
        let bound_ids: Vec<WindowId> = self
            .store
            .windows()
            .filter(|win| win.surface_id().is_some())
            .map(|win| win.id)
            .collect();
        for id in bound_ids {
            self.sync.push_update(&self.store, id);
        }
    }

    // ── Pointer interaction ──

    pub fn begin_titlebar_drag(&mut self, id: WindowId, x: i32, y: i32) -> bool {
        let started = self.interaction.begin_drag(&mut self.store, id, x, y);
        if started {
            self.sync.push_focus(&self.store, id);
        }
        started
    }

    pub fn begin_resize(&mut self, id: WindowId, edge: ResizeEdge, x: i32, y: i32) -> bool {
        self.interaction.begin_resize(&mut self.store, id, edge, x, y)
    }

    /// Movement tick. Geometry stays responsive regardless of the network:
    /// the update call is fire-and-forget and never awaited.
    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.interaction.pointer_move(&mut self.store, x, y);
        if let Some(interaction) = self.interaction.active() {
            let id = interaction.window_id;
            self.sync.push_update(&self.store, id);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(id) = self.interaction.pointer_up(&mut self.store) {
            self.sync.push_update(&self.store, id);
        }
    }

    // ── Host-facing read model ──

    /// Visible windows in paint order.
    pub fn draw_list(&self) -> Vec<WindowView> {
        self.store.draw_list()
    }

    /// Snap-preview rectangle while a drag hovers a zone.
    pub fn snap_preview(&self) -> Option<Rect> {
        self.interaction.snap_preview_rect(self.store.bounds())
    }

    // ── Command surface ──

    pub fn commands(&self) -> Vec<CommandEntry> {
        build_entries(&self.store, &self.catalog)
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn set_command_query(&mut self, query: &str) {
        self.palette.set_query(query);
    }

    pub fn move_command_selection(&mut self, delta: isize) {
        let entries = self.commands();
        let len = self.palette.filtered(&entries).len();
        self.palette.move_selection(delta, len);
    }

    /// Runs the currently selected palette entry, if any.
    pub fn run_selected_command(&mut self) {
        let entries = self.commands();
        let Some(action) = self
            .palette
            .selected_entry(&entries)
            .map(|entry| entry.action.clone())
        else {
            return;
        };
        self.run_command(&action);
    }

    pub fn run_command(&mut self, action: &CommandAction) {
        match action {
            CommandAction::FocusOrOpen { content_ref } => {
                self.open_app(content_ref, OpenDisposition::Reuse);
            }
            CommandAction::OpenNew { content_ref } => {
                self.open_app(content_ref, OpenDisposition::NewInstance);
            }
            CommandAction::Close(id) => self.close(*id),
            CommandAction::Minimize(id) => self.minimize(*id),
            CommandAction::ToggleMaximize(id) => self.toggle_maximize(*id),
            CommandAction::Snap(id, zone) => self.snap(*id, *zone),
            CommandAction::ToggleTheme => self.theme = self.theme.toggled(),
            CommandAction::Disconnect => self.disconnect_requested = true,
        }
    }

    // ── Inbound frames ──

    /// Entry point for every frame the transport delivers. Responses
    /// resolve in-flight surface calls; the snapshot event triggers a
    /// reconciliation pass. Anything else on the channel is ignored here.
    pub fn handle_frame(&mut self, frame: &Frame) {
        match frame {
            Frame::Res(response) => self.sync.handle_response(&mut self.store, response),
            Frame::Evt(event) if event.event == EVENT_SURFACE_SNAPSHOT => {
                let Some(payload) = event.payload.clone() else {
                    tracing::warn!("surface snapshot without payload");
                    return;
                };
                match serde_json::from_value::<SurfaceSnapshotPayload>(payload) {
                    Ok(snapshot) => {
                        self.sync
                            .reconcile(&mut self.store, &snapshot.surfaces, &self.catalog);
                    }
                    Err(error) => tracing::warn!(%error, "malformed surface snapshot"),
                }
            }
            Frame::Evt(event) => {
                tracing::debug!(event = %event.event, "ignoring non-surface event");
            }
            Frame::Req(request) => {
                tracing::debug!(method = %request.method, "ignoring inbound request frame");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{EventFrame, RequestFrame};
    use serde_json::json;

    const BOUNDS: Rect = Rect::new(0, 0, 1000, 700);

    fn shell() -> Shell<Vec<RequestFrame>> {
        Shell::new(
            BOUNDS,
            vec![
                Launchable::new("chat", "Chat", &["talk"]),
                Launchable::new("nodes", "Nodes", &[]),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn open_app_rejects_unknown_content() {
        let mut shell = shell();
        assert!(shell.open_app("bogus", OpenDisposition::Reuse).is_none());
        assert!(shell.store().is_empty());
    }

    #[test]
    fn reuse_open_keeps_one_window() {
        let mut shell = shell();
        let first = shell.open_app("chat", OpenDisposition::Reuse).unwrap();
        let second = shell.open_app("chat", OpenDisposition::Reuse).unwrap();
        assert_eq!(first, second);
        assert_eq!(shell.store().len(), 1);
        assert_eq!(shell.store().focused(), Some(first));
    }

    #[test]
    fn theme_and_disconnect_commands() {
        let mut shell = shell();
        assert_eq!(shell.theme(), ThemeMode::Dark);
        shell.run_command(&CommandAction::ToggleTheme);
        assert_eq!(shell.theme(), ThemeMode::Light);
        assert!(!shell.take_disconnect_request());
        shell.run_command(&CommandAction::Disconnect);
        assert!(shell.take_disconnect_request());
        assert!(!shell.take_disconnect_request());
    }

    #[test]
    fn palette_selection_runs_entry() {
        let mut shell = shell();
        shell.set_command_query("nodes");
        shell.run_selected_command();
        assert_eq!(shell.store().len(), 1);
        assert_eq!(
            shell.store().windows().next().unwrap().content_ref,
            "nodes"
        );
    }

    #[test]
    fn snapshot_event_reaches_reconciliation() {
        let mut shell = shell();
        let frame = Frame::Evt(EventFrame {
            event: EVENT_SURFACE_SNAPSHOT.to_string(),
            payload: Some(json!({
                "surfaces": {
                    "s1": {
                        "surfaceId": "s1",
                        "kind": "app",
                        "contentRef": "chat",
                        "state": "open",
                    }
                }
            })),
            seq: Some(1),
        });
        shell.handle_frame(&frame);
        assert_eq!(shell.store().len(), 1);
        // Same delivery again: idempotent.
        shell.handle_frame(&frame);
        assert_eq!(shell.store().len(), 1);
    }

    #[test]
    fn malformed_snapshot_is_contained() {
        let mut shell = shell();
        shell.handle_frame(&Frame::Evt(EventFrame {
            event: EVENT_SURFACE_SNAPSHOT.to_string(),
            payload: Some(json!({"surfaces": 42})),
            seq: None,
        }));
        assert!(shell.store().is_empty());
    }
}

use std::collections::{HashMap, HashSet};

use super::SurfaceTransport;
use crate::commands::Launchable;
use crate::layout::clamp;
use crate::protocol::{
    METHOD_SURFACE_CLOSE, METHOD_SURFACE_FOCUS, METHOD_SURFACE_OPEN, METHOD_SURFACE_UPDATE,
    RequestFrame, ResponseFrame, Surface, SurfaceCloseParams, SurfaceFocusParams, SurfaceKind,
    SurfaceOpenParams, SurfaceOpenResult, SurfaceState, SurfaceUpdateParams,
};
use crate::window::{Binding, WindowId, WindowStore};

/// Keeps the local window store consistent with the shared surface map.
///
/// Three pieces of bookkeeping make the merge race-free without transport
/// ordering guarantees:
/// - the *ownership set*: surface ids this client created, which are the
///   local source of truth and never overwritten by their own echo;
/// - *pending-open* correlation: request id → window id recorded before the
///   `surface.open` call leaves, so a snapshot that arrives ahead of the
///   response cannot materialize a duplicate;
/// - the *closing set*: ids whose `surface.close` is in flight, so a stale
///   snapshot cannot resurrect a window the user just closed.
pub struct SurfaceSyncClient<T> {
    transport: T,
    owned: HashSet<String>,
    pending_opens: HashMap<String, WindowId>,
    closing: HashSet<String>,
}

impl<T: SurfaceTransport> SurfaceSyncClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            owned: HashSet::new(),
            pending_opens: HashMap::new(),
            closing: HashSet::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn is_owned(&self, surface_id: &str) -> bool {
        self.owned.contains(surface_id)
    }

    pub fn pending_open_count(&self) -> usize {
        self.pending_opens.len()
    }

    /// Starts sharing a freshly opened local window. The window is marked
    /// `Pending` and the correlation recorded *before* the call leaves, so
    /// the reconciliation pass already sees the pending state when a
    /// snapshot races the response.
    pub fn open_surface(&mut self, store: &mut WindowStore, id: WindowId) {
        let Some(win) = store.window(id) else {
            return;
        };
        let params = SurfaceOpenParams {
            kind: win.kind,
            content_ref: win.content_ref.clone(),
            label: win.label.clone(),
            rect: Some(win.rect.into()),
        };
        let Some(frame) = request(METHOD_SURFACE_OPEN, &params) else {
            return;
        };
        let request_id = frame.id.clone();
        store.set_binding(id, Binding::Pending);
        self.pending_opens.insert(request_id.clone(), id);
        if let Err(error) = self.transport.send(frame) {
            tracing::warn!(%error, window = ?id, "surface open failed to send; window stays local");
            self.pending_opens.remove(&request_id);
            store.set_binding(id, Binding::Local);
        }
    }

    /// Best-effort state/geometry update for a bound window. Fire and
    /// forget: failures are logged and the next local mutation tries again.
    pub fn push_update(&mut self, store: &WindowStore, id: WindowId) {
        let Some(win) = store.window(id) else {
            return;
        };
        let Some(surface_id) = win.surface_id() else {
            return;
        };
        let params = SurfaceUpdateParams {
            surface_id: surface_id.to_string(),
            state: Some(if win.minimized {
                SurfaceState::Minimized
            } else {
                SurfaceState::Open
            }),
            rect: Some(win.rect.into()),
            label: win.label.clone(),
            z_index: Some(win.z_order as i64),
        };
        let Some(frame) = request(METHOD_SURFACE_UPDATE, &params) else {
            return;
        };
        if let Err(error) = self.transport.send(frame) {
            tracing::warn!(%error, surface_id = %params.surface_id, "surface update dropped");
        }
    }

    /// Advisory focus notification for a bound window.
    pub fn push_focus(&mut self, store: &WindowStore, id: WindowId) {
        let Some(surface_id) = store.window(id).and_then(|win| win.surface_id()) else {
            return;
        };
        let params = SurfaceFocusParams {
            surface_id: surface_id.to_string(),
        };
        let Some(frame) = request(METHOD_SURFACE_FOCUS, &params) else {
            return;
        };
        if let Err(error) = self.transport.send(frame) {
            tracing::debug!(%error, "surface focus dropped");
        }
    }

    /// Reflects a local close. Call with the closed window's binding, after
    /// removing it from the store. Pending opens need no action here: the
    /// compensating close happens when the open response arrives and finds
    /// the window gone.
    pub fn note_closed(&mut self, binding: &Binding) {
        if let Binding::Bound(surface_id) = binding {
            self.owned.remove(surface_id);
            self.closing.insert(surface_id.clone());
            self.send_close(surface_id);
        }
    }

    /// Resolves an in-flight `surface.open`. On success the id joins the
    /// ownership set and binds to the window; a window closed while the call
    /// was in flight gets a compensating close instead. Rejection (for
    /// example a registry at capacity) leaves the window unbound and purely
    /// local.
    pub fn handle_response(&mut self, store: &mut WindowStore, response: &ResponseFrame) {
        let Some(window_id) = self.pending_opens.remove(&response.id) else {
            // Updates/closes are fire-and-forget; nothing to correlate.
            tracing::debug!(id = %response.id, "response for untracked request");
            return;
        };
        if !response.ok {
            if let Some(error) = &response.error {
                tracing::warn!(code = error.code, message = %error.message, "surface open rejected");
            }
            store.set_binding(window_id, Binding::Local);
            return;
        }
        let surface_id = match response
            .payload
            .clone()
            .map(serde_json::from_value::<SurfaceOpenResult>)
        {
            Some(Ok(result)) => result.surface_id,
            Some(Err(error)) => {
                tracing::warn!(%error, "malformed surface open payload");
                store.set_binding(window_id, Binding::Local);
                return;
            }
            None => {
                tracing::warn!("surface open response without payload");
                store.set_binding(window_id, Binding::Local);
                return;
            }
        };
        if store.window(window_id).is_none() {
            // Closed locally before the open resolved; only now do we know
            // the id to close remotely.
            tracing::debug!(%surface_id, "compensating close for window closed mid-open");
            self.closing.insert(surface_id.clone());
            self.send_close(&surface_id);
            return;
        }
        self.owned.insert(surface_id.clone());
        store.set_binding(window_id, Binding::Bound(surface_id));
    }

    /// Full-diff reconciliation of an inbound snapshot. Idempotent: running
    /// it twice against the same map is a no-op the second time, and a
    /// window that is still legitimately open is never destroyed and
    /// recreated.
    pub fn reconcile(
        &mut self,
        store: &mut WindowStore,
        surfaces: &HashMap<String, Surface>,
        catalog: &[Launchable],
    ) {
        // A close we issued has been applied once the id leaves the map.
        self.closing.retain(|surface_id| surfaces.contains_key(surface_id));

        // 1. Remote removal: another client closed a surface we mirror.
        let stale: Vec<WindowId> = store
            .windows()
            .filter_map(|win| {
                let surface_id = win.surface_id()?;
                if self.owned.contains(surface_id) {
                    return None;
                }
                let gone = match surfaces.get(surface_id) {
                    None => true,
                    Some(surface) => surface.state == SurfaceState::Closed,
                };
                gone.then_some(win.id)
            })
            .collect();
        for id in stale {
            tracing::debug!(window = ?id, "removing window for vanished surface");
            store.close(id);
        }

        // 2. Remote addition: materialize surfaces we have no window for.
        for (surface_id, surface) in surfaces {
            if surface.state == SurfaceState::Closed
                || self.owned.contains(surface_id)
                || self.closing.contains(surface_id)
                || store.find_by_surface(surface_id).is_some()
            {
                continue;
            }
            if store.has_pending_for(&surface.content_ref) {
                // Likely the echo of our own unresolved open; revisited on
                // the next snapshot once the response has bound the id.
                tracing::debug!(%surface_id, content_ref = %surface.content_ref, "skipping surface with open call in flight");
                continue;
            }
            match surface.kind {
                SurfaceKind::Unknown => {
                    tracing::debug!(%surface_id, "skipping surface of unknown kind");
                    continue;
                }
                SurfaceKind::App
                    if !catalog
                        .iter()
                        .any(|launchable| launchable.content_ref == surface.content_ref) =>
                {
                    tracing::debug!(%surface_id, content_ref = %surface.content_ref, "skipping app surface with no launchable");
                    continue;
                }
                _ => {}
            }
            store.adopt(
                surface_id,
                surface.kind,
                &surface.content_ref,
                surface.label.clone(),
                surface.rect.map(|rect| rect.to_rect()),
                surface.state == SurfaceState::Minimized,
            );
        }

        // 3. Remote drift: adopt state (and free-floating geometry) for
        // windows other clients own. Our own windows are the source of
        // truth and ignore the echo of their prior updates.
        let bounds = store.bounds();
        let drift: Vec<(WindowId, Option<bool>, Option<crate::layout::Rect>)> = store
            .windows()
            .filter_map(|win| {
                let surface_id = win.surface_id()?;
                if self.owned.contains(surface_id) {
                    return None;
                }
                let surface = surfaces.get(surface_id)?;
                let remote_minimized = surface.state == SurfaceState::Minimized;
                let minimized_change =
                    (remote_minimized != win.minimized).then_some(remote_minimized);
                let rect_change = if win.is_docked() {
                    // Locally snapped/maximized geometry is not modeled on
                    // the wire; keep it until the user un-docks.
                    None
                } else {
                    surface
                        .rect
                        .map(|rect| clamp(rect.to_rect(), bounds))
                        .filter(|rect| *rect != win.rect)
                };
                if minimized_change.is_none() && rect_change.is_none() {
                    None
                } else {
                    Some((win.id, minimized_change, rect_change))
                }
            })
            .collect();
        for (id, minimized, rect) in drift {
            if let Some(minimized) = minimized {
                store.set_minimized_remote(id, minimized);
            }
            if let Some(rect) = rect {
                store.set_rect(id, rect);
            }
        }
    }

    fn send_close(&mut self, surface_id: &str) {
        let params = SurfaceCloseParams {
            surface_id: surface_id.to_string(),
        };
        let Some(frame) = request(METHOD_SURFACE_CLOSE, &params) else {
            return;
        };
        if let Err(error) = self.transport.send(frame) {
            tracing::warn!(%error, %surface_id, "surface close dropped");
        }
    }
}

fn request<P: serde::Serialize>(method: &str, params: &P) -> Option<RequestFrame> {
    match serde_json::to_value(params) {
        Ok(value) => Some(RequestFrame::new(method, Some(value))),
        Err(error) => {
            tracing::warn!(%error, method, "failed to encode request params");
            None
        }
    }
}

//! Wire types for the gateway channel.
//!
//! Frames travel as JSON with a `type` tag (`req`/`res`/`evt`); requests and
//! responses correlate by id. Only the surface subset of the gateway method
//! space is modeled here — everything else on the channel belongs to other
//! clients of the transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::layout::Rect;

/// Method name for creating a shared surface.
pub const METHOD_SURFACE_OPEN: &str = "surface.open";
/// Method name for best-effort surface state/geometry updates.
pub const METHOD_SURFACE_UPDATE: &str = "surface.update";
/// Method name for closing a surface. Idempotent on the gateway side.
pub const METHOD_SURFACE_CLOSE: &str = "surface.close";
/// Method name for the advisory focus notification.
pub const METHOD_SURFACE_FOCUS: &str = "surface.focus";
/// Event carrying the full authoritative surface map.
pub const EVENT_SURFACE_SNAPSHOT: &str = "surface.snapshot";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frame {
    Req(RequestFrame),
    Res(ResponseFrame),
    Evt(EventFrame),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFrame {
    pub id: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RequestFrame {
    pub fn new(method: &str, params: Option<Value>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            method: method.to_string(),
            params,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFrame {
    pub id: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorShape>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFrame {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorShape {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

// ── Surface records ──

/// What a surface shows. Kinds this client does not understand are carried
/// as `Unknown` and skipped during reconciliation rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    App,
    Webview,
    Media,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceState {
    Open,
    Minimized,
    Closed,
}

/// Geometry on the wire. Fractional pixels survive round-trips through
/// clients that position windows with subpixel precision; this client
/// rounds on adoption.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for SurfaceRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x as f64,
            y: rect.y as f64,
            width: rect.width as f64,
            height: rect.height as f64,
        }
    }
}

impl SurfaceRect {
    pub fn to_rect(self) -> Rect {
        Rect {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
            width: self.width.round().max(0.0) as u32,
            height: self.height.round().max(0.0) as u32,
        }
    }
}

/// Shared surface record; the authoritative copy lives with the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub surface_id: String,
    pub kind: SurfaceKind,
    pub content_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub state: SurfaceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<SurfaceRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

// ── Call parameters and payloads ──

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceOpenParams {
    pub kind: SurfaceKind,
    pub content_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<SurfaceRect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceOpenResult {
    pub surface_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdateParams {
    pub surface_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SurfaceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<SurfaceRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceCloseParams {
    pub surface_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceFocusParams {
    pub surface_id: String,
}

/// Payload of [`EVENT_SURFACE_SNAPSHOT`]: the complete current map, not a
/// delta. Every delivery is treated as authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSnapshotPayload {
    pub surfaces: HashMap<String, Surface>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_envelope_round_trips() {
        let frame = Frame::Req(RequestFrame::new(
            METHOD_SURFACE_CLOSE,
            Some(json!({"surfaceId": "s1"})),
        ));
        let text = serde_json::to_string(&frame).unwrap();
        assert!(text.contains("\"type\":\"req\""));
        let back: Frame = serde_json::from_str(&text).unwrap();
        match back {
            Frame::Req(req) => assert_eq!(req.method, METHOD_SURFACE_CLOSE),
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_tolerated() {
        let surface: Surface = serde_json::from_value(json!({
            "surfaceId": "s1",
            "kind": "hologram",
            "contentRef": "x",
            "state": "open",
        }))
        .unwrap();
        assert_eq!(surface.kind, SurfaceKind::Unknown);
    }

    #[test]
    fn surface_rect_rounds_on_adoption() {
        let rect = SurfaceRect {
            x: 10.6,
            y: -3.2,
            width: 300.49,
            height: 200.5,
        };
        assert_eq!(rect.to_rect(), Rect::new(11, -3, 300, 201));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let params = SurfaceUpdateParams {
            surface_id: "s1".into(),
            state: Some(SurfaceState::Minimized),
            rect: None,
            label: None,
            z_index: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({"surfaceId": "s1", "state": "minimized"}));
    }
}

//! IPC protocol between the Rust side of the panel and its embedded page.
//!
//! Messages flow in both directions:
//! - **Page -> Rust**: the page calls `window.docpane.ipc.send(kind, ..)`,
//!   which posts JSON through the webview's IPC handler.
//! - **Rust -> Page**: Rust evaluates a small dispatch snippet that routes
//!   a message to the handler the page registered for its kind.
//!
//! This typed channel replaces the host-origin check a string-origin
//! implementation would need: control messages can only enter the page
//! through the injected bridge. The page still checks the local renderer
//! origin on window messages before treating them as readiness signals.

use serde::{Deserialize, Serialize};

/// A typed IPC message from the page to Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message kind / command name.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from the page).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Messages the panel's page can send to the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMessage {
    /// The nested frame's content signalled readiness: its internal
    /// transport is up and view-to-editor sync can start.
    Ready,
}

impl SurfaceMessage {
    /// Interpret a parsed IPC message; `None` for unknown kinds.
    pub fn from_ipc(message: &IpcMessage) -> Option<Self> {
        match message.kind.as_str() {
            "ready" => Some(Self::Ready),
            _ => None,
        }
    }
}

/// JavaScript snippet that sets up the IPC bridge on the page side.
/// Injected as an initialization script into the panel's webview.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.docpane = window.docpane || {};
    window.docpane.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
})();
"#;

/// Generate the JS snippet that dispatches a message to the page's
/// handler for `kind`.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.docpane.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

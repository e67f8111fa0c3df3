//! The preview surface: a sandboxed webview panel embedding a nested
//! frame pointed at the externally rendered document.
//!
//! Provides:
//! - A generated page with per-creation CSP nonces, a loading indicator,
//!   and a "no content" explanatory panel
//! - A typed IPC bridge between the page and the Rust side
//! - A [`panel::PanelFactory`] implementing the coordinator's surface
//!   factory trait over `wry`

pub mod html;
pub mod ipc;
pub mod panel;

pub use ipc::{IpcMessage, SurfaceMessage};
pub use panel::{is_navigation_allowed, PanelFactory, PreviewPanel};

//! Preview coordination between a text editor and a live-rendered
//! documentation pane.
//!
//! The [`PreviewCoordinator`] is a single task that drains one inbound
//! channel of [`CoordinatorEvent`]s, processing them strictly in arrival
//! order. Host editor callbacks, renderer notifications, and surface
//! lifecycle signals all funnel into that channel through a
//! [`CoordinatorHandle`].
//!
//! The coordinator never touches the host IDE or the webview directly;
//! it talks to them through the [`EditorHost`], [`RenderClient`], and
//! [`SurfacePort`]/[`SurfaceFactory`] traits. The real surface holds a
//! webview, which is not `Send`, so the coordinator is meant to run on
//! the UI thread's local task set (`tokio::task::spawn_local`).

pub mod coordinator;
pub mod events;
pub mod host;
pub mod render;
pub mod surface;

pub use coordinator::{CoordinatorHandle, PreviewCoordinator};
pub use events::CoordinatorEvent;
pub use host::{EditorHost, EditorView, VisibleRange};
pub use render::{
    PreviewFileParams, PreviewFileResult, RenderClient, ScrollEditorParams,
    ShowDocumentNotification, ShowDocumentParams,
};
pub use surface::{SurfaceFactory, SurfacePort};

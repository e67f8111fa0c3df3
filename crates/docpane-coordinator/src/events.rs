//! The tagged union of everything that can happen to the coordinator.
//!
//! Host editor callbacks, renderer notifications, server lifecycle, and
//! surface lifecycle all become one of these and are queued on a single
//! channel, so the state machine sees a strict arrival order with no
//! interleaving.

use docpane_common::{Placement, SurfaceId};

use crate::host::EditorView;

#[derive(Debug)]
pub enum CoordinatorEvent {
    /// A host "open preview" command, invoked for the focused editor.
    OpenPreview {
        editor: EditorView,
        placement: Placement,
    },
    /// The host's active editor changed.
    ActiveEditorChanged { editor: EditorView },
    /// The visible ranges of some editor changed (fires per keystroke and
    /// per scroll).
    VisibleRangesChanged { editor: EditorView },
    /// The renderer asked the preview to navigate to a content uri.
    ShowDocument { uri: String },
    /// The renderer asked the editor to scroll to a line (0-indexed).
    ScrollEditor { line: u32 },
    /// The external render server came up.
    ServerStarted,
    /// The external render server went away.
    ServerStopped,
    /// The surface was closed (user action or teardown).
    SurfaceClosed { id: SurfaceId },
    /// The surface's embedded content finished loading and its transport
    /// is live.
    SurfaceReady { id: SurfaceId },
    /// Stop the coordinator task.
    Shutdown,
}

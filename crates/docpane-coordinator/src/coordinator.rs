//! The preview coordinator state machine.
//!
//! Two states: no session, or one live session with an optionally
//! associated source document (`current_uri`). The coordinator owns the
//! surface exclusively; it creates it lazily on the first preview request
//! and drops it on server loss or user close.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use docpane_common::{DocumentUri, LineRange, Placement, SurfaceId};

use crate::events::CoordinatorEvent;
use crate::host::{find_editor_for, EditorHost, EditorView};
use crate::render::{
    PreviewFileParams, PreviewFileResult, RenderClient, ScrollEditorParams,
    ShowDocumentNotification,
};
use crate::surface::{SurfaceFactory, SurfacePort};

/// How many lines of context to reveal above and below a renderer-requested
/// scroll target.
const SCROLL_PADDING: u32 = 2;

// =============================================================================
// HANDLE
// =============================================================================

/// Cloneable front door to the coordinator task.
///
/// The embedding layer binds its command registrations and collaborator
/// callbacks to these methods; each one enqueues an event and returns
/// immediately. Events are processed strictly in the order they were
/// enqueued.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::UnboundedSender<CoordinatorEvent>,
}

impl CoordinatorHandle {
    fn send(&self, event: CoordinatorEvent) {
        if self.tx.send(event).is_err() {
            debug!("coordinator gone, event dropped");
        }
    }

    /// "Open preview" command: preview the focused editor in the active pane.
    pub fn open_preview(&self, editor: EditorView) {
        self.send(CoordinatorEvent::OpenPreview {
            editor,
            placement: Placement::Active,
        });
    }

    /// "Open preview to side" command: preview the focused editor in a split.
    pub fn open_preview_to_side(&self, editor: EditorView) {
        self.send(CoordinatorEvent::OpenPreview {
            editor,
            placement: Placement::Beside,
        });
    }

    /// Host callback: the active editor changed.
    pub fn active_editor_changed(&self, editor: EditorView) {
        self.send(CoordinatorEvent::ActiveEditorChanged { editor });
    }

    /// Host callback: an editor's visible ranges changed.
    pub fn visible_ranges_changed(&self, editor: EditorView) {
        self.send(CoordinatorEvent::VisibleRangesChanged { editor });
    }

    /// Renderer notification: navigate the preview to a content uri.
    pub fn show_document(&self, notification: ShowDocumentNotification) {
        self.send(CoordinatorEvent::ShowDocument {
            uri: notification.params.uri,
        });
    }

    /// Renderer notification: scroll the editor to a rendered-content line.
    pub fn scroll_editor(&self, params: ScrollEditorParams) {
        self.send(CoordinatorEvent::ScrollEditor { line: params.line });
    }

    /// Render server lifecycle: the server came up.
    pub fn server_started(&self) {
        self.send(CoordinatorEvent::ServerStarted);
    }

    /// Render server lifecycle: the server went away.
    pub fn server_stopped(&self) {
        self.send(CoordinatorEvent::ServerStopped);
    }

    /// Surface lifecycle: the surface with `id` was closed.
    pub fn surface_closed(&self, id: SurfaceId) {
        self.send(CoordinatorEvent::SurfaceClosed { id });
    }

    /// Surface lifecycle: the surface's embedded content is live.
    pub fn surface_ready(&self, id: SurfaceId) {
        self.send(CoordinatorEvent::SurfaceReady { id });
    }

    /// Stop the coordinator task after the events already queued.
    pub fn shutdown(&self) {
        self.send(CoordinatorEvent::Shutdown);
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Owns the preview session state and processes [`CoordinatorEvent`]s.
pub struct PreviewCoordinator {
    host: Box<dyn EditorHost>,
    render: Box<dyn RenderClient>,
    surfaces: Box<dyn SurfaceFactory>,
    rx: mpsc::UnboundedReceiver<CoordinatorEvent>,

    /// The live preview surface, if any.
    surface: Option<Box<dyn SurfacePort>>,
    /// The source document the session is showing.
    ///
    /// Cleared only when the user closes the surface. A server-stop tears
    /// the surface down without routing through that clearing path, so
    /// the uri survives and a later server-start can restore the same
    /// preview target.
    current_uri: Option<DocumentUri>,
}

impl PreviewCoordinator {
    pub fn new(
        host: Box<dyn EditorHost>,
        render: Box<dyn RenderClient>,
        surfaces: Box<dyn SurfaceFactory>,
    ) -> (Self, CoordinatorHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            host,
            render,
            surfaces,
            rx,
            surface: None,
            current_uri: None,
        };
        (coordinator, CoordinatorHandle { tx })
    }

    /// Drain the inbound channel until shutdown.
    ///
    /// Each event runs to completion before the next one is looked at;
    /// the only suspension point is the render await inside a preview
    /// request. The returned future is not `Send` (the surface may hold a
    /// webview), so run it via `tokio::task::spawn_local`.
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            if matches!(event, CoordinatorEvent::Shutdown) {
                debug!("coordinator shutting down");
                break;
            }
            self.handle_event(event).await;
        }
    }

    async fn handle_event(&mut self, event: CoordinatorEvent) {
        match event {
            CoordinatorEvent::OpenPreview { editor, placement } => {
                self.preview_editor(&editor, placement).await;
            }
            CoordinatorEvent::ActiveEditorChanged { editor } => {
                self.on_editor_changed(&editor).await;
            }
            CoordinatorEvent::VisibleRangesChanged { editor } => {
                self.scroll_view(&editor);
            }
            CoordinatorEvent::ShowDocument { uri } => {
                self.show_document(&uri);
            }
            CoordinatorEvent::ScrollEditor { line } => {
                self.scroll_editor(line);
            }
            CoordinatorEvent::ServerStarted => {
                self.on_server_started().await;
            }
            CoordinatorEvent::ServerStopped => {
                self.on_server_stopped();
            }
            CoordinatorEvent::SurfaceClosed { id } => {
                self.on_surface_closed(id);
            }
            CoordinatorEvent::SurfaceReady { id } => {
                self.on_surface_ready(id);
            }
            CoordinatorEvent::Shutdown => unreachable!("handled in run()"),
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Preview the given editor's document, creating the surface if needed.
    async fn preview_editor(&mut self, editor: &EditorView, placement: Placement) {
        if self.surface.is_some() && self.current_uri.as_ref() == Some(&editor.uri) {
            // Already previewing this document.
            return;
        }

        if let Err(e) = self.ensure_surface(placement) {
            warn!(error = %e, "failed to create preview surface");
            return;
        }

        let params = PreviewFileParams {
            uri: editor.uri.as_str().to_string(),
            show: Some(false),
        };

        // The render may resolve after newer events changed `current_uri`;
        // the result is still applied against whatever surface exists.
        let result = match self.render.preview_file(params).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, uri = %editor.uri, "render request failed");
                PreviewFileResult::default()
            }
        };

        match result.uri {
            None => {
                // Nothing to show. `current_uri` stays untouched so a
                // transient miss does not disassociate the session from
                // the intended document.
                debug!(uri = %editor.uri, "no content for document");
                if let Some(surface) = &mut self.surface {
                    if let Err(e) = surface.show_nothing() {
                        warn!(error = %e, "failed to push no-content state");
                    }
                }
            }
            Some(_) => {
                // The content push itself arrives through the renderer's
                // show-document notification.
                self.current_uri = Some(editor.uri.clone());
            }
        }
    }

    /// Active editor changed: treat as an implicit open-beside preview.
    async fn on_editor_changed(&mut self, editor: &EditorView) {
        if self.surface.is_none() {
            return;
        }
        // The host's log-output pseudo-documents must never become
        // preview targets.
        if editor.uri.scheme() == Some("output") {
            return;
        }
        self.preview_editor(editor, Placement::Beside).await;
    }

    /// Editor-to-view sync: forward the first visible line to the renderer.
    fn scroll_view(&self, editor: &EditorView) {
        if Some(&editor.uri) != self.current_uri.as_ref() {
            return;
        }
        // More than one range means some regions are folded; only the
        // first is forwarded.
        let Some(range) = editor.visible_ranges.first() else {
            return;
        };
        self.render.scroll_view(range.start_line + 1);
    }

    /// Renderer asked the preview to navigate somewhere.
    fn show_document(&mut self, uri: &str) {
        let Some(surface) = &mut self.surface else {
            debug!(uri, "show-document dropped: no session");
            return;
        };
        if let Err(e) = surface.show_url(uri) {
            warn!(error = %e, uri, "failed to push content url");
        }
    }

    /// View-to-editor sync: reveal a padded range around the target line.
    fn scroll_editor(&self, line: u32) {
        let Some(editor) = find_editor_for(self.host.as_ref(), self.current_uri.as_ref()) else {
            return;
        };
        let target = LineRange::padded(line, SCROLL_PADDING);
        self.host.reveal_range(&editor.uri, target);
    }

    /// Server came up: restore the preview that was open before it went away.
    async fn on_server_started(&mut self) {
        let Some(editor) = find_editor_for(self.host.as_ref(), self.current_uri.as_ref()) else {
            return;
        };
        debug!(uri = %editor.uri, "render server started, restoring preview");
        self.preview_editor(&editor, Placement::Beside).await;
    }

    /// Server went away: tear the surface down but remember what it showed.
    fn on_server_stopped(&mut self) {
        if let Some(surface) = self.surface.take() {
            debug!(id = %surface.id(), "render server stopped, tearing surface down");
        }
        // `current_uri` deliberately survives; a SurfaceClosed event for
        // the dropped surface no longer matches a live session and is
        // ignored in on_surface_closed.
    }

    /// The user closed the surface: the only natural clearing path.
    fn on_surface_closed(&mut self, id: SurfaceId) {
        match &self.surface {
            Some(surface) if surface.id() == id => {
                debug!(%id, "surface closed");
                self.surface = None;
                self.current_uri = None;
            }
            _ => {
                // Close event from an already-replaced or already-dropped
                // surface; state belongs to a newer session.
                debug!(%id, "stale surface close ignored");
            }
        }
    }

    /// Embedded content is live: resync the view to the editor's scroll.
    fn on_surface_ready(&mut self, id: SurfaceId) {
        match &self.surface {
            Some(surface) if surface.id() == id => {}
            _ => {
                debug!(%id, "stale surface ready ignored");
                return;
            }
        }
        if let Some(editor) = find_editor_for(self.host.as_ref(), self.current_uri.as_ref()) {
            self.scroll_view(&editor);
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn ensure_surface(&mut self, placement: Placement) -> Result<(), docpane_common::SurfaceError> {
        if self.surface.is_none() {
            let surface = self.surfaces.create(placement)?;
            debug!(id = %surface.id(), ?placement, "preview surface created");
            self.surface = Some(surface);
        }
        Ok(())
    }

    #[cfg(test)]
    fn current_uri(&self) -> Option<&DocumentUri> {
        self.current_uri.as_ref()
    }

    #[cfg(test)]
    fn has_surface(&self) -> bool {
        self.surface.is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================

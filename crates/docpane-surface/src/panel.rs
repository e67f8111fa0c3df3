//! The wry-backed preview panel and its factory.
//!
//! `PanelFactory` implements the coordinator's [`SurfaceFactory`] trait,
//! building one child webview per session and wiring its IPC and
//! navigation handlers back into the coordinator's event channel.

use std::rc::Rc;

use tracing::{debug, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::{Rect, WebView, WebViewBuilder};

use docpane_common::{Placement, SurfaceError, SurfaceId};
use docpane_coordinator::{CoordinatorHandle, SurfaceFactory, SurfacePort};

use crate::html;
use crate::ipc::{js_dispatch_message, IpcMessage, SurfaceMessage, IPC_INIT_SCRIPT};

/// Control payload meaning "there is nothing to show".
const NOTHING: &str = "<nothing>";

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for panel navigation.
///
/// The panel only ever hosts its own generated page and a nested frame
/// pointed at the local renderer; everything else is blocked.
pub const ALLOWED_NAV_PREFIXES: &[&str] = &["http://localhost:", "about:blank"];

/// Check whether a URL is allowed by the navigation allowlist.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// PANEL
// =============================================================================

/// One live preview panel.
///
/// The embedding host owns panel visibility and close; when the user
/// closes the pane hosting this panel, the host must drop the panel and
/// call [`CoordinatorHandle::surface_closed`] with its id.
pub struct PreviewPanel {
    webview: WebView,
    id: SurfaceId,
    /// Last content url pushed to the page, kept for recovery after the
    /// panel is recreated or restored from a backgrounded state.
    last_shown_url: Option<String>,
}

impl PreviewPanel {
    pub fn last_shown_url(&self) -> Option<&str> {
        self.last_shown_url.as_deref()
    }

    /// Re-push the last shown url, if any. Used by the embedding host
    /// when the panel returns from a backgrounded state and the page
    /// could not recover on its own.
    pub fn restore(&mut self) -> Result<(), SurfaceError> {
        if let Some(url) = self.last_shown_url.clone() {
            self.dispatch_show(&url)?;
        }
        Ok(())
    }

    /// Reposition the panel within the parent window.
    pub fn set_bounds(&self, bounds: Rect) -> Result<(), SurfaceError> {
        self.webview
            .set_bounds(bounds)
            .map_err(|e| SurfaceError::WebView(e.to_string()))
    }

    /// Show or hide the panel.
    pub fn set_visible(&self, visible: bool) -> Result<(), SurfaceError> {
        self.webview
            .set_visible(visible)
            .map_err(|e| SurfaceError::WebView(e.to_string()))
    }

    fn dispatch_show(&self, target: &str) -> Result<(), SurfaceError> {
        let script = js_dispatch_message("show", &serde_json::Value::from(target));
        self.webview
            .evaluate_script(&script)
            .map_err(|e| SurfaceError::Script(e.to_string()))
    }
}

impl SurfacePort for PreviewPanel {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn show_url(&mut self, url: &str) -> Result<(), SurfaceError> {
        debug!(id = %self.id, url, "panel navigating to content");
        self.last_shown_url = Some(url.to_string());
        self.dispatch_show(url)
    }

    fn show_nothing(&mut self) -> Result<(), SurfaceError> {
        debug!(id = %self.id, "panel showing no-content state");
        // The last shown url is kept; the page only raises its
        // explanatory panel if no content was ever loaded.
        self.dispatch_show(NOTHING)
    }
}

// =============================================================================
// FACTORY
// =============================================================================

/// Builds preview panels as children of the host window.
///
/// `layout` maps the requested placement to bounds within the parent
/// window; the embedding host decides what "active pane" and "beside"
/// mean geometrically.
pub struct PanelFactory<W: HasWindowHandle> {
    window: Rc<W>,
    coordinator: CoordinatorHandle,
    layout: Box<dyn Fn(Placement) -> Rect>,
    devtools: bool,
    next_id: u32,
}

impl<W: HasWindowHandle> PanelFactory<W> {
    pub fn new(
        window: Rc<W>,
        coordinator: CoordinatorHandle,
        layout: Box<dyn Fn(Placement) -> Rect>,
    ) -> Self {
        Self {
            window,
            coordinator,
            layout,
            devtools: cfg!(debug_assertions),
            next_id: 0,
        }
    }

    fn build_panel(&mut self, placement: Placement) -> Result<PreviewPanel, SurfaceError> {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;

        // Fresh nonces each time the surface is (re)created.
        let css_nonce = html::nonce();
        let script_nonce = html::nonce();
        let page = html::page(&css_nonce, &script_nonce);

        let handle = self.coordinator.clone();
        let builder = WebViewBuilder::new()
            .with_bounds((self.layout)(placement))
            .with_devtools(self.devtools)
            .with_focused(false)
            .with_initialization_script(IPC_INIT_SCRIPT)
            .with_ipc_handler(move |request| {
                let body = request.body().to_string();
                let Some(message) = IpcMessage::from_json(&body) else {
                    warn!(%id, body_len = body.len(), "IPC message rejected: invalid JSON");
                    return;
                };
                match SurfaceMessage::from_ipc(&message) {
                    Some(SurfaceMessage::Ready) => {
                        debug!(%id, "panel content ready");
                        handle.surface_ready(id);
                    }
                    None => {
                        debug!(%id, kind = %message.kind, "unknown IPC message ignored");
                    }
                }
            })
            .with_navigation_handler(move |url| {
                if !is_navigation_allowed(&url) {
                    warn!(%id, url = %url, "navigation blocked: URL not in allowlist");
                    return false;
                }
                true
            })
            .with_html(&page);

        let webview = builder
            .build_as_child(self.window.as_ref())
            .map_err(|e| SurfaceError::WebView(e.to_string()))?;

        debug!(%id, ?placement, "preview panel created");

        Ok(PreviewPanel {
            webview,
            id,
            last_shown_url: None,
        })
    }
}

impl<W: HasWindowHandle> SurfaceFactory for PanelFactory<W> {
    fn create(&mut self, placement: Placement) -> Result<Box<dyn SurfacePort>, SurfaceError> {
        Ok(Box::new(self.build_panel(placement)?))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -- Allowed URLs --

    #[test]
    fn allows_local_renderer() {
        assert!(is_navigation_allowed("http://localhost:5500/index.html"));
        assert!(is_navigation_allowed("http://localhost:8000/api/changelog.html"));
    }

    #[test]
    fn allows_about_blank() {
        assert!(is_navigation_allowed("about:blank"));
    }

    // -- Blocked URLs --

    #[test]
    fn blocks_remote_origins() {
        assert!(!is_navigation_allowed("https://example.com"));
        assert!(!is_navigation_allowed("http://evil.com"));
        assert!(!is_navigation_allowed("https://localhost:5500/"));
    }

    #[test]
    fn blocks_lookalike_hosts() {
        assert!(!is_navigation_allowed("http://localhost.evil.com:5500/"));
        assert!(!is_navigation_allowed("http://notlocalhost:5500/"));
    }

    #[test]
    fn blocks_file_protocol() {
        assert!(!is_navigation_allowed("file:///etc/passwd"));
    }

    #[test]
    fn blocks_javascript_and_data_protocols() {
        assert!(!is_navigation_allowed("javascript:alert(1)"));
        assert!(!is_navigation_allowed("data:text/html,<h1>x</h1>"));
    }

    #[test]
    fn blocks_empty_and_garbage() {
        assert!(!is_navigation_allowed(""));
        assert!(!is_navigation_allowed("not-a-url"));
    }

    #[test]
    fn allowlist_has_expected_entries() {
        assert_eq!(ALLOWED_NAV_PREFIXES.len(), 2);
        assert!(ALLOWED_NAV_PREFIXES.contains(&"http://localhost:"));
        assert!(ALLOWED_NAV_PREFIXES.contains(&"about:blank"));
    }
}

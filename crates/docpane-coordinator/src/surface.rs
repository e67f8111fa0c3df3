//! The coordinator's view of the preview surface.
//!
//! The real implementation wraps a webview panel (see `docpane-surface`);
//! tests wire in a recording fake. The coordinator only ever pushes two
//! commands at the surface: navigate to a content url, or show the
//! "nothing to preview" state.

use docpane_common::{Placement, SurfaceError, SurfaceId};

/// Command side of one live preview surface.
pub trait SurfacePort {
    fn id(&self) -> SurfaceId;

    /// Navigate the surface's nested frame to `url`.
    fn show_url(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Tell the surface there is nothing to show. The surface keeps any
    /// previously shown content and only raises its explanatory panel if
    /// no content was ever loaded.
    fn show_nothing(&mut self) -> Result<(), SurfaceError>;
}

/// Creates preview surfaces on demand.
///
/// Each created surface gets a fresh [`SurfaceId`]; lifecycle events the
/// surface emits (ready, closed) carry that id back to the coordinator.
pub trait SurfaceFactory {
    fn create(&mut self, placement: Placement) -> Result<Box<dyn SurfacePort>, SurfaceError>;
}

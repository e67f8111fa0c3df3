//! The render collaborator: the external command/service that turns a
//! source uri into a viewable content uri, plus the notification shapes
//! it exchanges with the coordinator.

use async_trait::async_trait;
use docpane_common::CoordinatorError;
use serde::{Deserialize, Serialize};

/// Outbound render request: "build (or look up) the preview for this
/// source document".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewFileParams {
    pub uri: String,
    /// When `false`, the server replies with the content uri instead of
    /// pushing its own show-document notification for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
}

/// Result of a render request. `uri: None` means the document is not part
/// of the documentation project or has not been built yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewFileResult {
    pub uri: Option<String>,
}

/// Inbound view-to-editor scroll notification. `line` is 0-indexed in the
/// rendered content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollEditorParams {
    pub line: u32,
}

/// Payload of the renderer's show-document notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowDocumentParams {
    pub uri: String,
}

/// Envelope the renderer wraps show-document notifications in. Only
/// `params.uri` is consumed; `default` is carried opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowDocumentNotification {
    pub params: ShowDocumentParams,
    #[serde(default)]
    pub default: serde_json::Value,
}

/// Client side of the render collaborator.
///
/// `?Send` because the coordinator and everything it owns live on the UI
/// thread's local task set.
#[async_trait(?Send)]
pub trait RenderClient {
    /// Ask the collaborator to produce viewable content for a source uri.
    ///
    /// No timeout is enforced here; that is the collaborator's concern.
    async fn preview_file(
        &self,
        params: PreviewFileParams,
    ) -> Result<PreviewFileResult, CoordinatorError>;

    /// Editor-to-view sync: notify the renderer that the top of the
    /// visible editor range is now at `line` (1-indexed).
    fn scroll_view(&self, line: u32);
}

//! Abstraction over the host IDE's window/editor surface.

use docpane_common::{DocumentUri, LineRange};

/// One visible region of an editor, in 0-indexed lines.
///
/// An editor can report more than one range when regions of the document
/// are folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start_line: u32,
    pub end_line: u32,
}

/// Snapshot of a visible text editor, as reported by the host.
#[derive(Debug, Clone)]
pub struct EditorView {
    pub uri: DocumentUri,
    pub visible_ranges: Vec<VisibleRange>,
}

impl EditorView {
    pub fn new(uri: impl Into<DocumentUri>, visible_ranges: Vec<VisibleRange>) -> Self {
        Self {
            uri: uri.into(),
            visible_ranges,
        }
    }
}

/// The host IDE's window/editor primitives, as the coordinator needs them.
///
/// Implemented by the embedding layer against the actual IDE APIs; tests
/// supply a fake.
pub trait EditorHost {
    /// All currently visible editors, in host order.
    fn visible_editors(&self) -> Vec<EditorView>;

    /// Scroll the editor showing `uri` so that `range` is aligned with the
    /// top of the viewport. No-op if no such editor is visible.
    fn reveal_range(&self, uri: &DocumentUri, range: LineRange);
}

/// Return the visible editor showing the given uri, if any.
///
/// A linear scan; a missing editor is an expected outcome (the document
/// may simply not be open anywhere), never an error.
pub fn find_editor_for(host: &dyn EditorHost, uri: Option<&DocumentUri>) -> Option<EditorView> {
    let uri = uri?;
    host.visible_editors()
        .into_iter()
        .find(|editor| &editor.uri == uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHost {
        editors: Vec<EditorView>,
    }

    impl EditorHost for FixedHost {
        fn visible_editors(&self) -> Vec<EditorView> {
            self.editors.clone()
        }

        fn reveal_range(&self, _uri: &DocumentUri, _range: LineRange) {}
    }

    #[test]
    fn find_editor_matches_on_uri() {
        let host = FixedHost {
            editors: vec![
                EditorView::new("file:///a.rst", vec![]),
                EditorView::new("file:///b.rst", vec![]),
            ],
        };
        let uri = DocumentUri::new("file:///b.rst");
        let found = find_editor_for(&host, Some(&uri));
        assert_eq!(found.unwrap().uri, uri);
    }

    #[test]
    fn find_editor_without_uri_is_none() {
        let host = FixedHost {
            editors: vec![EditorView::new("file:///a.rst", vec![])],
        };
        assert!(find_editor_for(&host, None).is_none());
    }

    #[test]
    fn find_editor_not_visible_is_none() {
        let host = FixedHost { editors: vec![] };
        let uri = DocumentUri::new("file:///a.rst");
        assert!(find_editor_for(&host, Some(&uri)).is_none());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a source document as the host IDE reports it.
///
/// Stored as the full URI string; equality is plain string equality,
/// matching how the host compares document identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentUri(String);

impl DocumentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URI scheme, if the string has a well-formed one.
    ///
    /// Used to filter out the host's pseudo-documents (e.g. the `output`
    /// scheme backing log channels), which must never become preview
    /// targets.
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.0.split_once(':')?;
        let mut chars = scheme.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return None,
        }
        if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            Some(scheme)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a newly created preview surface should be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Replace the active pane.
    Active,
    /// Open in a split beside the active pane.
    Beside,
}

impl Default for Placement {
    fn default() -> Self {
        Self::Beside
    }
}

/// Identifies one preview surface instance.
///
/// Ids increase monotonically across a coordinator's lifetime so a close
/// event from an already-replaced surface cannot clear state belonging to
/// a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// A half-open range of 0-indexed editor lines, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The range `[max(0, line - padding), line + padding)` — the window
    /// of context revealed around a line the renderer asked to scroll to.
    pub fn padded(line: u32, padding: u32) -> Self {
        Self {
            start: line.saturating_sub(padding),
            end: line + padding,
        }
    }
}

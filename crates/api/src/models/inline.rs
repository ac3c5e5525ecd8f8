use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference id of interned inline content. It is the hash of the normalized
/// payload and doubles as the cache validator.
pub type ReferenceId = u64;

/// Content class of an inline snippet. Each class is interned separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKind {
    Script,
    Stylesheet,
}

impl InlineKind {
    /// Tag name wrapping the payload in raw inline markup.
    pub fn tag_name(self) -> &'static str {
        match self {
            InlineKind::Script => "script",
            InlineKind::Stylesheet => "style",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            InlineKind::Script => "text/javascript",
            InlineKind::Stylesheet => "text/css",
        }
    }

    /// Canonical validator for an id. Class-qualified so a script and a
    /// stylesheet with equal ids never share a tag.
    pub fn etag(self, id: ReferenceId) -> String {
        format!("{}:{}", self, id)
    }
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineKind::Script => f.write_str("Script"),
            InlineKind::Stylesheet => f.write_str("Stylesheet"),
        }
    }
}

/// Result of serving an inline reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeOutcome {
    Content {
        body: String,
        etag: String,
        content_type: &'static str,
    },
    NotModified,
}

/// Counters for one inline store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStats {
    pub entries: usize,
    pub raw_keys: usize,
    pub total_bytes: usize,
}

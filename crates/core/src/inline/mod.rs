//! Process-wide cache turning inline snippets into cacheable resources.

pub mod normalize;
pub mod routes;
pub mod store;

pub use routes::InlineRoutes;
pub use store::InlineStore;

use pagebundle_api::{InlineContentService, InlineKind, InlineStats, ReferenceId, ServeOutcome};

/// Inline scripts and stylesheets, interned independently.
///
/// Created once at process start and shared by reference; nothing is ever
/// evicted.
pub struct InlineCache {
    scripts: InlineStore,
    stylesheets: InlineStore,
}

impl InlineCache {
    pub fn new() -> Self {
        Self {
            scripts: InlineStore::new(InlineKind::Script),
            stylesheets: InlineStore::new(InlineKind::Stylesheet),
        }
    }

    pub fn store(&self, kind: InlineKind) -> &InlineStore {
        match kind {
            InlineKind::Script => &self.scripts,
            InlineKind::Stylesheet => &self.stylesheets,
        }
    }
}

impl Default for InlineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineContentService for InlineCache {
    fn intern(&self, kind: InlineKind, raw: &str, debug: bool) -> ReferenceId {
        self.store(kind).intern(raw, debug)
    }

    fn serve(
        &self,
        kind: InlineKind,
        id: Option<ReferenceId>,
        if_none_match: Option<&str>,
    ) -> ServeOutcome {
        self.store(kind).serve(id, if_none_match)
    }

    fn stats(&self, kind: InlineKind) -> InlineStats {
        self.store(kind).stats()
    }
}

use crate::models::{InlineKind, InlineStats, ReferenceId, ServeOutcome};

/// Service interface for the process-wide inline content cache
pub trait InlineContentService: Send + Sync {
    /// Intern raw inline markup and return its reference id
    fn intern(&self, kind: InlineKind, raw: &str, debug: bool) -> ReferenceId;

    /// Serve interned content honoring a conditional tag
    fn serve(
        &self,
        kind: InlineKind,
        id: Option<ReferenceId>,
        if_none_match: Option<&str>,
    ) -> ServeOutcome;

    /// Get per-class statistics
    fn stats(&self, kind: InlineKind) -> InlineStats;
}

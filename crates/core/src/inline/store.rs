//! Content-addressed store for one class of inline content.
//!
//! Both maps are append-only and live as long as the store. Concurrent
//! interning of the same content races only on insert-if-absent, and the
//! first writer's content is kept.

use super::normalize::{content_hash, normalize, raw_hash};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use pagebundle_api::{InlineKind, InlineStats, ReferenceId, ServeOutcome};
use std::sync::Arc;

pub struct InlineStore {
    kind: InlineKind,
    /// Normalized content hash to normalized content.
    contents: DashMap<ReferenceId, Arc<str>>,
    /// Raw input hash to normalized content hash.
    raw_index: DashMap<u64, ReferenceId>,
}

impl InlineStore {
    pub fn new(kind: InlineKind) -> Self {
        Self {
            kind,
            contents: DashMap::new(),
            raw_index: DashMap::new(),
        }
    }

    /// Intern raw inline markup and return the id of its normalized payload.
    pub fn intern(&self, raw: &str, debug: bool) -> ReferenceId {
        let raw_key = raw_hash(raw, debug);
        if let Some(id) = self.raw_index.get(&raw_key).map(|entry| *entry) {
            tracing::trace!(kind = %self.kind, id, "inline content memo hit");
            return id;
        }

        let payload = normalize(self.kind, raw, debug);
        let id = content_hash(&payload);

        match self.contents.entry(id) {
            Entry::Occupied(existing) => {
                if **existing.get() != *payload {
                    tracing::warn!(
                        kind = %self.kind,
                        id,
                        "hash collision in inline store, keeping first content"
                    );
                } else {
                    tracing::debug!(kind = %self.kind, id, "inline content shared by another source");
                }
            }
            Entry::Vacant(slot) => {
                tracing::debug!(kind = %self.kind, id, bytes = payload.len(), "interned inline content");
                slot.insert(Arc::from(payload));
            }
        }

        self.raw_index.entry(raw_key).or_insert(id);
        id
    }

    pub fn get(&self, id: ReferenceId) -> Option<Arc<str>> {
        self.contents.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Serve stored content unless the client already holds it.
    ///
    /// Unknown or missing ids are answered as not modified rather than as an
    /// error.
    pub fn serve(&self, id: Option<ReferenceId>, if_none_match: Option<&str>) -> ServeOutcome {
        let Some(id) = id else {
            return ServeOutcome::NotModified;
        };
        let Some(content) = self.get(id) else {
            tracing::debug!(kind = %self.kind, id, "unknown inline reference");
            return ServeOutcome::NotModified;
        };

        let etag = self.kind.etag(id);
        if if_none_match == Some(etag.as_str()) {
            return ServeOutcome::NotModified;
        }

        ServeOutcome::Content {
            body: content.to_string(),
            etag,
            content_type: self.kind.content_type(),
        }
    }

    pub fn stats(&self) -> InlineStats {
        InlineStats {
            entries: self.contents.len(),
            raw_keys: self.raw_index.len(),
            total_bytes: self.contents.iter().map(|entry| entry.value().len()).sum(),
        }
    }
}

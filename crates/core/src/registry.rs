//! Request-scoped accumulation of page assets.
//!
//! Contributions arrive in any order from any rendering unit. A contribution
//! whose markup already occurs inside an earlier item collapses into that
//! item; the merged item keeps the lowest kind seen, which may move it to an
//! earlier zone.

use crate::markup::{self, LinkPattern};
use crate::strip::{SeenLinks, strip_duplicate_links};
use pagebundle_api::{AssetKind, Position, Zone};

/// One contributed fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetItem {
    pub kind: AssetKind,
    pub position: Position,
    /// Fully rendered markup, possibly several tags.
    pub markup: String,
    /// Contributors, present only when diagnostics are enabled.
    pub provenance: Option<String>,
}

impl AssetItem {
    pub fn new(kind: AssetKind, position: Position, markup: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            markup: markup.into(),
            provenance: None,
        }
    }

    pub fn with_provenance(mut self, provenance: Option<String>) -> Self {
        self.provenance = provenance;
        self
    }

    fn merge_provenance(&mut self, other: Option<String>) {
        self.provenance = match (self.provenance.take(), other) {
            (Some(existing), Some(new)) => Some(format!(
                "{}{}{}",
                existing,
                markup::PROVENANCE_SEPARATOR,
                new
            )),
            (existing, new) => existing.or(new),
        };
    }
}

/// How markup is compared when looking for an existing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    /// File-based contributions: paths differ only by case on case-insensitive hosts.
    Insensitive,
    /// Inline contributions: links carry numeric ids.
    Sensitive,
}

impl MatchCase {
    fn occurs_in(self, needle: &str, haystack: &str) -> bool {
        match self {
            MatchCase::Sensitive => haystack.contains(needle),
            MatchCase::Insensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Collapsed into the existing item at this index.
    Merged(usize),
    /// Empty markup is never recorded.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    items: Vec<AssetItem>,
    diagnostics: bool,
    /// Script links emitted by the last head render; the body render skips them.
    head_links: Option<SeenLinks>,
}

impl AssetRegistry {
    pub fn new(diagnostics: bool) -> Self {
        Self {
            items: Vec::new(),
            diagnostics,
            head_links: None,
        }
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    pub fn items(&self) -> &[AssetItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record a contribution, collapsing it into an existing item whose
    /// markup already contains it.
    pub fn add(&mut self, item: AssetItem, case: MatchCase) -> AddOutcome {
        if item.markup.trim().is_empty() {
            tracing::debug!(kind = %item.kind, "ignoring contribution with empty markup");
            return AddOutcome::Ignored;
        }

        let provenance = if self.diagnostics {
            item.provenance
        } else {
            None
        };

        let existing = self
            .items
            .iter()
            .position(|existing| case.occurs_in(&item.markup, &existing.markup));

        match existing {
            Some(index) => {
                let target = &mut self.items[index];
                target.merge_provenance(provenance);
                if item.kind < target.kind {
                    tracing::debug!(from = %target.kind, to = %item.kind, "promoting merged asset");
                    target.kind = item.kind;
                }
                AddOutcome::Merged(index)
            }
            None => {
                self.items.push(AssetItem {
                    provenance,
                    ..item
                });
                AddOutcome::Added
            }
        }
    }

    /// Items of a zone in render order: position, then kind, then insertion.
    pub fn zone_items(&self, zone: Zone) -> Vec<&AssetItem> {
        let mut items: Vec<&AssetItem> = self
            .items
            .iter()
            .filter(|item| zone.contains(item.kind))
            .collect();
        items.sort_by_key(|item| (item.position, item.kind));
        items
    }

    /// Render one zone.
    ///
    /// The head zone records the script links it emitted and the body zone
    /// leaves those out, so head scripts must be rendered before body scripts.
    pub fn render(&mut self, zone: Zone) -> String {
        let fragments = match zone {
            Zone::Styles => {
                let mut seen = SeenLinks::new();
                strip_duplicate_links(
                    self.zone_items(zone),
                    LinkPattern::Stylesheet,
                    &mut seen,
                    self.diagnostics,
                )
            }
            Zone::HeadScripts => {
                let mut seen = SeenLinks::new();
                let fragments = strip_duplicate_links(
                    self.zone_items(zone),
                    LinkPattern::Script,
                    &mut seen,
                    self.diagnostics,
                );
                self.head_links = Some(seen);
                fragments
            }
            Zone::BodyScripts => {
                let mut seen = self.head_links.clone().unwrap_or_default();
                strip_duplicate_links(
                    self.zone_items(zone),
                    LinkPattern::Script,
                    &mut seen,
                    self.diagnostics,
                )
            }
        };

        fragments.join(markup::LINE_SEPARATOR)
    }

    pub fn render_styles(&mut self) -> String {
        self.render(Zone::Styles)
    }

    pub fn render_head_scripts(&mut self) -> String {
        self.render(Zone::HeadScripts)
    }

    pub fn render_body_scripts(&mut self) -> String {
        self.render(Zone::BodyScripts)
    }
}

//! Removes individual file links that were already emitted.
//!
//! Two different bundles may expand to the same underlying file. Their
//! fragments differ as a whole, so item-level dedup keeps both; this pass
//! re-scans each fragment link by link.

use crate::markup::{self, LinkPattern};
use crate::registry::AssetItem;
use std::collections::HashSet;

/// Case-insensitive set of link targets already emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenLinks {
    urls: HashSet<String>,
}

impl SeenLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a link. Returns false when it was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_lowercase())
    }
}

/// Emit each link of `items` once, in first-occurrence order.
///
/// With `diagnostics` set, every item is preceded by a provenance comment,
/// even when all of its links turn out to be duplicates.
pub fn strip_duplicate_links<'a>(
    items: impl IntoIterator<Item = &'a AssetItem>,
    pattern: LinkPattern,
    seen: &mut SeenLinks,
    diagnostics: bool,
) -> Vec<String> {
    let mut fragments = Vec::new();

    for item in items {
        if diagnostics {
            fragments.push(markup::provenance_comment(
                item.position,
                item.provenance.as_deref(),
            ));
        }

        for link in markup::extract_links(pattern, &item.markup) {
            if seen.insert(link.url) {
                fragments.push(link.tag.to_string());
            } else {
                tracing::trace!(url = link.url, "dropping duplicate link");
            }
        }
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{script_tag, stylesheet_tag};
    use pagebundle_api::AssetKind;

    fn bundle(kind: AssetKind, tags: &[String]) -> AssetItem {
        AssetItem::new(kind, 0, tags.join("\r\n"))
    }

    #[test]
    fn test_shared_file_emitted_once() {
        let x = bundle(
            AssetKind::Style,
            &[stylesheet_tag("/a.css"), stylesheet_tag("/b.css")],
        );
        let y = bundle(
            AssetKind::Style,
            &[stylesheet_tag("/A.css"), stylesheet_tag("/c.css")],
        );

        let mut seen = SeenLinks::new();
        let out = strip_duplicate_links([&x, &y], LinkPattern::Stylesheet, &mut seen, false);
        assert_eq!(
            out,
            vec![
                stylesheet_tag("/a.css"),
                stylesheet_tag("/b.css"),
                stylesheet_tag("/c.css"),
            ]
        );
        assert!(!seen.insert("/C.css"));
    }

    #[test]
    fn test_preseeded_links_are_dropped() {
        let item = bundle(
            AssetKind::BodyScript,
            &[script_tag("/js/shared.js"), script_tag("/js/page.js")],
        );
        let mut seen = SeenLinks::new();
        seen.insert("/JS/Shared.js");

        let out = strip_duplicate_links([&item], LinkPattern::Script, &mut seen, false);
        assert_eq!(out, vec![script_tag("/js/page.js")]);
    }

    #[test]
    fn test_diagnostics_marker_precedes_item() {
        let mut item = bundle(AssetKind::HeadScript, &[script_tag("/a.js")]);
        item.position = 7;
        item.provenance = Some("Shared/_Layout".to_string());

        let mut seen = SeenLinks::new();
        let out = strip_duplicate_links([&item, &item], LinkPattern::Script, &mut seen, true);
        assert_eq!(
            out,
            vec![
                "<!-- Position [7], added from: Shared/_Layout -->".to_string(),
                script_tag("/a.js"),
                "<!-- Position [7], added from: Shared/_Layout -->".to_string(),
            ]
        );
    }
}

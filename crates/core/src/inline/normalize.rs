//! Normalization and hashing of inline snippets.

use once_cell::sync::Lazy;
use pagebundle_api::{InlineKind, ReferenceId};
use regex::Regex;
use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

// Block comments are tried first so a `//` inside one does not start a line comment.
static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

fn payload_pattern(kind: InlineKind) -> Regex {
    let tag = kind.tag_name();
    Regex::new(&format!(
        r"(?s)\s*<\s*{tag}.*?>\s*(?P<content>.+?)\s*</\s*{tag}\s*>\s*"
    ))
    .expect("payload pattern is valid")
}

static SCRIPT_PAYLOAD: Lazy<Regex> = Lazy::new(|| payload_pattern(InlineKind::Script));

static STYLE_PAYLOAD: Lazy<Regex> = Lazy::new(|| payload_pattern(InlineKind::Stylesheet));

/// Drop `//` and `/* */` comments, then collapse whitespace runs to one space.
///
/// Comments are removed textually, so a `//` inside a string literal also
/// cuts the rest of its line.
pub fn compact(content: &str) -> String {
    let without_comments = COMMENT.replace_all(content, "");
    WHITESPACE.replace_all(&without_comments, " ").into_owned()
}

/// Payloads of every outer tag of the given class, in document order.
///
/// Returns `None` when the content has no wrapping tag.
pub fn extract_payloads(kind: InlineKind, content: &str) -> Option<Vec<&str>> {
    let pattern = match kind {
        InlineKind::Script => &SCRIPT_PAYLOAD,
        InlineKind::Stylesheet => &STYLE_PAYLOAD,
    };

    let payloads: Vec<&str> = pattern
        .captures_iter(content)
        .filter_map(|caps| caps.name("content").map(|part| part.as_str()))
        .collect();
    (!payloads.is_empty()).then_some(payloads)
}

/// Produce the cacheable payload of raw inline markup.
///
/// Tags are unwrapped on the raw input, so comments never hide a closing tag.
/// Content without any wrapping tag is its own payload. Debug mode keeps every
/// payload verbatim; production mode compacts and trims each one.
pub fn normalize(kind: InlineKind, raw: &str, debug: bool) -> String {
    let payloads = extract_payloads(kind, raw).unwrap_or_else(|| vec![raw]);
    if debug {
        payloads.concat()
    } else {
        payloads
            .into_iter()
            .map(|payload| compact(payload).trim().to_string())
            .collect()
    }
}

/// Identity of normalized content.
pub fn content_hash(content: &str) -> ReferenceId {
    xxh3_64(content.as_bytes())
}

/// Key of raw input. Seeded by mode so a memo written in one mode is never
/// read back in the other.
pub fn raw_hash(raw: &str, debug: bool) -> u64 {
    xxh3_64_with_seed(raw.as_bytes(), u64::from(debug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_strips_comments_and_whitespace() {
        let raw = "var a = 1; // first\n/* block\n comment */\n\tvar b   = 2;";
        assert_eq!(compact(raw), "var a = 1; var b = 2;");
    }

    #[test]
    fn test_payload_of_multiple_tags_is_concatenated() {
        let raw = "<script>alert(1);</script>\n<script type=\"text/javascript\"> alert(2); </script>";
        assert_eq!(
            normalize(InlineKind::Script, raw, false),
            "alert(1);alert(2);"
        );
    }

    #[test]
    fn test_style_payload() {
        let raw = "<style>\n  h2 { color: red; } /* heading */\n</style>";
        assert_eq!(
            normalize(InlineKind::Stylesheet, raw, false),
            "h2 { color: red; }"
        );
    }

    #[test]
    fn test_debug_keeps_source_inside_tags() {
        let raw = "<script>\n  // keep me\n  alert(1);\n</script>";
        assert_eq!(
            normalize(InlineKind::Script, raw, true),
            "// keep me\n  alert(1);"
        );
    }

    #[test]
    fn test_trailing_line_comment_keeps_closing_tag() {
        assert_eq!(
            normalize(InlineKind::Script, "<script>alert(1); // greet</script>", false),
            "alert(1);"
        );
    }

    #[test]
    fn test_url_inside_block_comment() {
        assert_eq!(
            normalize(
                InlineKind::Stylesheet,
                "<style>/* see http://x.y */ p { color: red; }</style>",
                false
            ),
            "p { color: red; }"
        );
    }

    #[test]
    fn test_untagged_content() {
        assert_eq!(
            normalize(InlineKind::Script, "  // comment\n alert(1);  ", false),
            "alert(1);"
        );
        assert_eq!(
            normalize(InlineKind::Script, "  alert(1);  ", true),
            "  alert(1);  "
        );
    }

    #[test]
    fn test_raw_hash_depends_on_mode() {
        assert_ne!(raw_hash("alert(1);", true), raw_hash("alert(1);", false));
        assert_eq!(content_hash("x"), content_hash("x"));
    }
}

//! Rendered tag formats and the patterns that pull individual links back out
//! of rendered fragments.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Separator between rendered fragments.
pub const LINE_SEPARATOR: &str = "\r\n";

/// Separator between merged provenance entries.
pub const PROVENANCE_SEPARATOR: &str = ";\r\n";

/// Build a tag pattern where every space stands for optional whitespace.
fn tag_pattern(template: &str) -> Regex {
    RegexBuilder::new(&template.replace(' ', r"\s*"))
        .case_insensitive(true)
        .build()
        .expect("tag pattern is a valid regex")
}

static STYLESHEET_LINK: Lazy<Regex> =
    Lazy::new(|| tag_pattern(r#"(?P<tag>< link href = "(?P<link>[^"]+)" rel = "stylesheet" / >)"#));

static SCRIPT_SRC: Lazy<Regex> =
    Lazy::new(|| tag_pattern(r#"(?P<tag>< script src = "(?P<link>[^"]+)" > < / script >)"#));

pub fn stylesheet_tag(url: &str) -> String {
    format!(r#"<link href="{}" rel="stylesheet"/>"#, url)
}

pub fn script_tag(url: &str) -> String {
    format!(r#"<script src="{}"></script>"#, url)
}

pub fn provenance_comment(position: i32, source: Option<&str>) -> String {
    format!(
        "<!-- Position [{}], added from: {} -->",
        position,
        source.unwrap_or_default()
    )
}

/// Which family of tags to extract from a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPattern {
    Stylesheet,
    Script,
}

impl LinkPattern {
    fn regex(self) -> &'static Regex {
        match self {
            LinkPattern::Stylesheet => &STYLESHEET_LINK,
            LinkPattern::Script => &SCRIPT_SRC,
        }
    }
}

/// One link occurrence inside a rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTag<'a> {
    pub url: &'a str,
    pub tag: &'a str,
}

/// Extract every link of the given family, in document order.
pub fn extract_links(pattern: LinkPattern, markup: &str) -> Vec<LinkTag<'_>> {
    pattern
        .regex()
        .captures_iter(markup)
        .filter_map(|caps| {
            Some(LinkTag {
                url: caps.name("link")?.as_str(),
                tag: caps.name("tag")?.as_str(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_stylesheets_in_order() {
        let markup = format!(
            "{}\r\n{}",
            stylesheet_tag("/Content/a.css"),
            stylesheet_tag("/Content/b.css")
        );
        let links = extract_links(LinkPattern::Stylesheet, &markup);
        let urls: Vec<_> = links.iter().map(|l| l.url).collect();
        assert_eq!(urls, vec!["/Content/a.css", "/Content/b.css"]);
        assert_eq!(links[0].tag, stylesheet_tag("/Content/a.css"));
    }

    #[test]
    fn test_tolerates_whitespace_and_case() {
        let markup = r#"< LINK  href = "/x.css"   REL="stylesheet" / >"#;
        let links = extract_links(LinkPattern::Stylesheet, markup);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "/x.css");

        let markup = "<script src=\"/a.js\" >\n</script>";
        let links = extract_links(LinkPattern::Script, markup);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].tag, markup);
    }

    #[test]
    fn test_script_pattern_ignores_stylesheets() {
        let markup = stylesheet_tag("/a.css");
        assert!(extract_links(LinkPattern::Script, &markup).is_empty());
    }

    #[test]
    fn test_provenance_comment() {
        assert_eq!(
            provenance_comment(3, Some("Book/Detail")),
            "<!-- Position [3], added from: Book/Detail -->"
        );
    }
}

//! Page-level ordering and dedup behavior through the public API

use pagebundle_api::{AssetKind, LAST_POSITION};
use pagebundle_core::bundle::BundleTable;
use pagebundle_core::inline::{InlineCache, InlineRoutes};
use pagebundle_core::markup::{script_tag, stylesheet_tag};
use pagebundle_core::AssetEnvironment;
use std::sync::Arc;

fn environment() -> AssetEnvironment {
    let table = BundleTable::new()
        .with_bundle("~/css/x", ["~/Content/a.css", "~/Content/b.css"])
        .with_bundle("~/css/y", ["~/Content/a.css", "~/Content/c.css"])
        .with_bundle("~/js/js1", ["~/Scripts/book/js0.js", "~/Scripts/book/js1.js"])
        .with_bundle("~/js/js2", ["~/Scripts/book/js0.js", "~/Scripts/book/js2.js"]);
    AssetEnvironment::new(
        Arc::new(table),
        Arc::new(InlineCache::new()),
        InlineRoutes::new("PageBundle", Some("v1".to_string())),
    )
}

#[test]
fn test_head_render_is_idempotent() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_head_script("~/js/js1", 0).unwrap();
    page.add_inline_head_script("<script>boot();</script>", 1);

    let first = page.render_head_scripts();
    let second = page.render_head_scripts();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_head_and_body_request_for_same_file_emits_once_in_head() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_head_script("~/Scripts/a.js", 0).unwrap();
    page.add_body_script("~/Scripts/a.js", 0).unwrap();

    assert_eq!(page.registry().items().len(), 1);
    assert_eq!(page.render_head_scripts(), script_tag("/Scripts/a.js"));
    assert_eq!(page.render_body_scripts(), "");
}

#[test]
fn test_body_first_then_head_moves_to_head() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_body_script("~/Scripts/a.js", 0).unwrap();
    page.add_head_script("~/Scripts/a.js", 0).unwrap();

    assert_eq!(page.registry().items()[0].kind, AssetKind::HeadScript);
    assert_eq!(page.render_head_scripts(), script_tag("/Scripts/a.js"));
    assert_eq!(page.render_body_scripts(), "");
}

#[test]
fn test_positions_sort_ascending() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_style("~/Content/p10.css", 10).unwrap();
    page.add_style("~/Content/p0.css", 0).unwrap();
    page.add_style("~/Content/p5.css", 5).unwrap();

    let expected = [
        stylesheet_tag("/Content/p0.css"),
        stylesheet_tag("/Content/p5.css"),
        stylesheet_tag("/Content/p10.css"),
    ]
    .join("\r\n");
    assert_eq!(page.render_styles(), expected);
}

#[test]
fn test_equal_positions_fall_back_to_kind() {
    let env = environment();
    let mut page = env.begin_page();
    let id = page.add_inline_style("<style>h2 { color: red; }</style>", 0);
    page.add_style("~/Content/site.css", 0).unwrap();

    let expected = [
        stylesheet_tag("/Content/site.css"),
        stylesheet_tag(&format!("/PageBundle/v1/InlineStyles/{id}")),
    ]
    .join("\r\n");
    assert_eq!(page.render_styles(), expected);
}

#[test]
fn test_last_position_sentinel() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_body_script("~/Scripts/analytics.js", LAST_POSITION).unwrap();
    page.add_body_script("~/Scripts/page.js", 1_000).unwrap();

    assert_eq!(
        page.render_body_scripts(),
        format!(
            "{}\r\n{}",
            script_tag("/Scripts/page.js"),
            script_tag("/Scripts/analytics.js")
        )
    );
}

#[test]
fn test_overlapping_bundles_strip_shared_link() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_style("~/css/x", 0).unwrap();
    page.add_style("~/css/y", 0).unwrap();

    assert_eq!(page.registry().items().len(), 2);
    let expected = [
        stylesheet_tag("/Content/a.css"),
        stylesheet_tag("/Content/b.css"),
        stylesheet_tag("/Content/c.css"),
    ]
    .join("\r\n");
    assert_eq!(page.render_styles(), expected);
}

#[test]
fn test_head_bundle_file_not_repeated_in_body() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_head_script("~/js/js1", 0).unwrap();
    page.add_body_script("~/js/js2", 0).unwrap();

    assert_eq!(
        page.render_head_scripts(),
        format!(
            "{}\r\n{}",
            script_tag("/Scripts/book/js0.js"),
            script_tag("/Scripts/book/js1.js")
        )
    );
    assert_eq!(page.render_body_scripts(), script_tag("/Scripts/book/js2.js"));
}

#[test]
fn test_body_rendered_before_head_keeps_shared_file() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_head_script("~/js/js1", 0).unwrap();
    page.add_body_script("~/js/js2", 0).unwrap();

    // No head links are known yet, so the shared file stays in the body.
    assert_eq!(
        page.render_body_scripts(),
        format!(
            "{}\r\n{}",
            script_tag("/Scripts/book/js0.js"),
            script_tag("/Scripts/book/js2.js")
        )
    );
    assert_eq!(
        page.render_head_scripts(),
        format!(
            "{}\r\n{}",
            script_tag("/Scripts/book/js0.js"),
            script_tag("/Scripts/book/js1.js")
        )
    );
}

#[test]
fn test_merged_contributors_in_provenance_comment() {
    let env = environment().with_diagnostics(true);
    let mut page = env.begin_page();
    page.contributed_by("Views/Shared/_Layout.cshtml");
    page.add_style("~/Content/site.css", 0).unwrap();
    page.contributed_by("Views/Home/Index.cshtml");
    page.add_style("~/content/SITE.css", 0).unwrap();

    assert_eq!(page.registry().items().len(), 1);
    assert_eq!(
        page.render_styles(),
        format!(
            "<!-- Position [0], added from: Views/Shared/_Layout.cshtml;\r\nViews/Home/Index.cshtml -->\r\n{}",
            stylesheet_tag("/Content/site.css")
        )
    );
}

#[test]
fn test_file_identity_ignores_case() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_head_script("~/Scripts/User.js", 0).unwrap();
    page.add_head_script("~/scripts/user.js", 0).unwrap();

    assert_eq!(page.registry().items().len(), 1);
    assert_eq!(page.render_head_scripts(), script_tag("/Scripts/User.js"));
}

#[test]
fn test_narrow_request_absorbed_by_bundle() {
    let env = environment();
    let mut page = env.begin_page();
    page.add_style("~/css/x", 3).unwrap();
    page.add_style("~/Content/b.css", 0).unwrap();

    let items = page.registry().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].position, 3);
}

use pagebundle_api::{InlineContentService, InlineKind};
use pagebundle_core::config::Settings;
use pagebundle_core::inline::InlineCache;
use std::path::Path;

pub fn run(settings: &Settings, file: &Path, style: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let kind = if style {
        InlineKind::Stylesheet
    } else {
        InlineKind::Script
    };

    let cache = InlineCache::new();
    let id = cache.intern(kind, &raw, settings.debug);
    let stats = cache.stats(kind);

    println!("Reference Id: {}", id);
    println!("ETag:         {}", kind.etag(id));
    println!("Link:         {}", settings.routes().link(kind, id));
    println!("Payload:      {} bytes", stats.total_bytes);
    Ok(())
}

use pagebundle_api::{InlineContentService, InlineKind};
use pagebundle_core::config::Settings;
use pagebundle_core::inline::InlineCache;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub async fn run(
    mut settings: Settings,
    bind: Option<String>,
    area: Option<String>,
    scripts: &[PathBuf],
    styles: &[PathBuf],
) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        settings.bind = bind;
    }
    if let Some(area) = area {
        settings.area = area;
    }
    settings.validate()?;

    let cache: Arc<dyn InlineContentService> = Arc::new(InlineCache::new());
    let routes = settings.routes();

    let snippets = scripts
        .iter()
        .map(|file| (InlineKind::Script, file))
        .chain(styles.iter().map(|file| (InlineKind::Stylesheet, file)));
    for (kind, file) in snippets {
        let raw = std::fs::read_to_string(file)?;
        let link = pagebundle_server::preload(cache.as_ref(), &routes, kind, &raw, settings.debug);
        println!("{}\t{link}", file.display());
    }

    let app = pagebundle_server::router(&routes, cache);

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
        }
        shutdown.cancel();
    });

    pagebundle_server::run_http_server(app, &settings.bind, token).await?;
    Ok(())
}

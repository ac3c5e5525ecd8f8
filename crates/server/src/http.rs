use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use pagebundle_api::{InlineContentService, InlineKind, ReferenceId, ServeOutcome};
use pagebundle_core::inline::InlineRoutes;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Clone)]
pub struct InlineState {
    cache: Arc<dyn InlineContentService>,
}

impl InlineState {
    pub fn new(cache: Arc<dyn InlineContentService>) -> Self {
        Self { cache }
    }
}

pub fn router(routes: &InlineRoutes, cache: Arc<dyn InlineContentService>) -> Router {
    Router::new()
        .route(&routes.route_pattern(InlineKind::Script), get(serve_script))
        .route(
            &routes.route_pattern(InlineKind::Stylesheet),
            get(serve_stylesheet),
        )
        .with_state(InlineState::new(cache))
}

/// Intern a snippet ahead of serving and return the link it is served at.
pub fn preload(
    cache: &dyn InlineContentService,
    routes: &InlineRoutes,
    kind: InlineKind,
    raw: &str,
    debug: bool,
) -> String {
    let id = cache.intern(kind, raw, debug);
    let link = routes.link(kind, id);
    info!(%kind, id, %link, "preloaded inline content");
    link
}

pub async fn run_http_server(
    app: Router,
    bind: &str,
    cancel_token: CancellationToken,
) -> pagebundle_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    serve_listener(listener, app, cancel_token).await
}

/// Serve `app` on an already bound listener until the token is cancelled.
pub async fn serve_listener(
    listener: tokio::net::TcpListener,
    app: Router,
    cancel_token: CancellationToken,
) -> pagebundle_core::Result<()> {
    info!("Inline asset server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await?;
    Ok(())
}

pub async fn serve_script(
    State(state): State<InlineState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    respond(&state, InlineKind::Script, &id, &headers)
}

pub async fn serve_stylesheet(
    State(state): State<InlineState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    respond(&state, InlineKind::Stylesheet, &id, &headers)
}

fn respond(state: &InlineState, kind: InlineKind, raw_id: &str, headers: &HeaderMap) -> Response {
    // An id that does not parse is treated like an unknown one.
    let id = raw_id.parse::<ReferenceId>().ok();
    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());

    match state.cache.serve(kind, id, if_none_match) {
        ServeOutcome::Content {
            body,
            etag,
            content_type,
        } => (
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (header::ETAG, etag),
            ],
            body,
        )
            .into_response(),
        ServeOutcome::NotModified => StatusCode::NOT_MODIFIED.into_response(),
    }
}

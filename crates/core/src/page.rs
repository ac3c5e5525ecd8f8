//! Page-level asset API used while composing one response.
//!
//! [`AssetEnvironment`] holds what outlives a request (bundle resolver, inline
//! cache, routes, modes). [`PageAssets`] is created per request from it and
//! owns the request's [`AssetRegistry`].

use crate::config::Settings;
use crate::error::Result;
use crate::inline::{InlineCache, InlineRoutes};
use crate::registry::{AddOutcome, AssetItem, AssetRegistry, MatchCase};
use pagebundle_api::{
    BundleResolver, InlineContentService, InlineKind, Position, ReferenceId, Zone,
};
use std::sync::Arc;

/// Shared, process-lifetime collaborators of every page.
#[derive(Clone)]
pub struct AssetEnvironment {
    resolver: Arc<dyn BundleResolver>,
    inline: Arc<InlineCache>,
    routes: InlineRoutes,
    debug: bool,
    diagnostics: bool,
}

impl AssetEnvironment {
    pub fn new(
        resolver: Arc<dyn BundleResolver>,
        inline: Arc<InlineCache>,
        routes: InlineRoutes,
    ) -> Self {
        Self {
            resolver,
            inline,
            routes,
            debug: false,
            diagnostics: false,
        }
    }

    pub fn from_settings(
        settings: &Settings,
        resolver: Arc<dyn BundleResolver>,
        inline: Arc<InlineCache>,
    ) -> Self {
        Self::new(resolver, inline, settings.routes())
            .with_debug(settings.debug)
            .with_diagnostics(settings.diagnostics)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn inline_cache(&self) -> &Arc<InlineCache> {
        &self.inline
    }

    pub fn routes(&self) -> &InlineRoutes {
        &self.routes
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    /// Start collecting assets for one response.
    pub fn begin_page(&self) -> PageAssets<'_> {
        PageAssets {
            env: self,
            registry: AssetRegistry::new(self.diagnostics),
            contributor: None,
        }
    }
}

/// Request-scoped asset collector.
pub struct PageAssets<'env> {
    env: &'env AssetEnvironment,
    registry: AssetRegistry,
    contributor: Option<String>,
}

impl<'env> PageAssets<'env> {
    /// Name the rendering unit that makes the following contributions.
    pub fn contributed_by(&mut self, source: impl Into<String>) -> &mut Self {
        self.contributor = Some(source.into());
        self
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn add_style(&mut self, path: &str, position: Position) -> Result<()> {
        self.add_path(Zone::Styles, path, position, None)
    }

    pub fn add_head_script(&mut self, path: &str, position: Position) -> Result<()> {
        self.add_path(Zone::HeadScripts, path, position, None)
    }

    pub fn add_body_script(&mut self, path: &str, position: Position) -> Result<()> {
        self.add_path(Zone::BodyScripts, path, position, None)
    }

    /// Add `<style>` markup; it is served from the inline endpoint.
    pub fn add_inline_style(&mut self, raw: &str, position: Position) -> ReferenceId {
        self.add_inline(Zone::Styles, raw, position)
    }

    /// Add `<script>` markup to the head.
    pub fn add_inline_head_script(&mut self, raw: &str, position: Position) -> ReferenceId {
        self.add_inline(Zone::HeadScripts, raw, position)
    }

    /// Add `<script>` markup to the end of the body.
    pub fn add_inline_body_script(&mut self, raw: &str, position: Position) -> ReferenceId {
        self.add_inline(Zone::BodyScripts, raw, position)
    }

    /// Resolve a file or bundle path and record it in `zone`.
    ///
    /// `source` overrides the current contributor. Resolution failures
    /// propagate unchanged.
    pub fn add_path(
        &mut self,
        zone: Zone,
        path: &str,
        position: Position,
        source: Option<String>,
    ) -> Result<()> {
        let markup = if zone.is_script() {
            self.env.resolver.render_scripts(path)?
        } else {
            self.env.resolver.render_styles(path)?
        };

        let item = AssetItem::new(zone.file_kind(), position, markup)
            .with_provenance(source.or_else(|| self.contributor.clone()));
        if let AddOutcome::Merged(index) = self.registry.add(item, MatchCase::Insensitive) {
            tracing::debug!(path, index, "asset already present on page");
        }
        Ok(())
    }

    fn add_inline(&mut self, zone: Zone, raw: &str, position: Position) -> ReferenceId {
        let kind = if zone.is_script() {
            InlineKind::Script
        } else {
            InlineKind::Stylesheet
        };
        let id = self.env.inline.intern(kind, raw, self.env.debug);
        let markup = self.env.routes.tag(kind, id);

        let item = AssetItem::new(zone.inline_kind(), position, markup)
            .with_provenance(self.contributor.clone());
        self.registry.add(item, MatchCase::Sensitive);
        id
    }

    pub fn render(&mut self, zone: Zone) -> String {
        self.registry.render(zone)
    }

    pub fn render_styles(&mut self) -> String {
        self.registry.render_styles()
    }

    /// Must run before [`PageAssets::render_body_scripts`].
    pub fn render_head_scripts(&mut self) -> String {
        self.registry.render_head_scripts()
    }

    pub fn render_body_scripts(&mut self) -> String {
        self.registry.render_body_scripts()
    }
}

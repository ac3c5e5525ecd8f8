//! Static bundle table: virtual bundle paths expanded to one tag per file.

use crate::config::Settings;
use crate::markup;
use indexmap::IndexMap;
use pagebundle_api::{ApiError, ApiResult, BundleResolver};

#[derive(Debug, Clone, Default)]
pub struct BundleTable {
    /// Lowercased bundle path to its files, in declaration order.
    bundles: IndexMap<String, Vec<String>>,
}

impl BundleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut table = Self::new();
        for (path, files) in &settings.bundles {
            table.register(path, files.iter().cloned());
        }
        table
    }

    pub fn register(&mut self, path: &str, files: impl IntoIterator<Item = impl Into<String>>) {
        self.bundles.insert(
            path.to_lowercase(),
            files.into_iter().map(Into::into).collect(),
        );
    }

    pub fn with_bundle(
        mut self,
        path: &str,
        files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.register(path, files);
        self
    }

    /// Resolve a path to the site-relative URLs it stands for.
    pub fn expand(&self, path: &str) -> ApiResult<Vec<String>> {
        let path = path.trim();
        if let Some(files) = self.bundles.get(&path.to_lowercase()) {
            return Ok(files.iter().map(|file| to_url(file)).collect());
        }
        if is_file_like(path) {
            return Ok(vec![to_url(path)]);
        }
        Err(ApiError::UnresolvedPath(path.to_string()))
    }

    fn render(&self, path: &str, tag: fn(&str) -> String) -> ApiResult<String> {
        let tags: Vec<String> = self.expand(path)?.iter().map(|url| tag(url)).collect();
        Ok(tags.join(markup::LINE_SEPARATOR))
    }
}

impl BundleResolver for BundleTable {
    fn render_styles(&self, path: &str) -> ApiResult<String> {
        self.render(path, markup::stylesheet_tag)
    }

    fn render_scripts(&self, path: &str) -> ApiResult<String> {
        self.render(path, markup::script_tag)
    }
}

/// Map an application-relative path (`~/x`) to a site-relative URL (`/x`).
pub fn to_url(path: &str) -> String {
    match path.strip_prefix('~') {
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        Some(rest) => format!("/{rest}"),
        None => path.to_string(),
    }
}

fn is_file_like(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < name.len(),
        None => false,
    }
}

use crate::error::ApiResult;

/// Expands a logical asset path into concrete markup.
///
/// A path may name a single file or a bundle of several files; either way the
/// result is one or more rendered tags. The registry treats the returned
/// markup as opaque.
pub trait BundleResolver: Send + Sync {
    /// Render stylesheet link tags for a path.
    fn render_styles(&self, path: &str) -> ApiResult<String>;

    /// Render script tags for a path.
    fn render_scripts(&self, path: &str) -> ApiResult<String>;
}

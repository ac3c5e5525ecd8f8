//! Process-level settings.
//!
//! Settings come from an optional JSON file, then environment overrides.
//! Command-line flags are applied on top by the binary.

use crate::error::{PageBundleError, Result};
use crate::inline::InlineRoutes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV: &str = "PAGEBUNDLE_CONFIG";
pub const DEBUG_ENV: &str = "PAGEBUNDLE_DEBUG";
pub const DIAGNOSTICS_ENV: &str = "PAGEBUNDLE_DIAGNOSTICS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL area segment of the inline endpoint.
    pub area: String,
    /// Optional segment between the area and the controller name.
    pub version_segment: Option<String>,
    /// Skip normalization of inline content.
    pub debug: bool,
    /// Record contributors and emit provenance comments.
    pub diagnostics: bool,
    pub bind: String,
    /// Virtual bundle path to its ordered file list.
    pub bundles: IndexMap<String, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            area: "PageBundle".to_string(),
            version_segment: Some(format!("v{}", env!("CARGO_PKG_VERSION"))),
            debug: false,
            diagnostics: false,
            bind: "127.0.0.1:8080".to_string(),
            bundles: IndexMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `PAGEBUNDLE_CONFIG` when set, otherwise defaults, then apply
    /// environment overrides.
    pub fn from_env_or_default() -> Result<Self> {
        let mut settings = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        settings.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(flag) = lookup(DEBUG_ENV).as_deref().and_then(parse_flag) {
            self.debug = flag;
        }
        if let Some(flag) = lookup(DIAGNOSTICS_ENV).as_deref().and_then(parse_flag) {
            self.diagnostics = flag;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.area.trim().is_empty() || self.area.contains('/') {
            return Err(PageBundleError::Config(format!(
                "area must be a single non-empty path segment, got {:?}",
                self.area
            )));
        }
        if let Some(segment) = &self.version_segment {
            if segment.trim().is_empty() || segment.contains('/') {
                return Err(PageBundleError::Config(format!(
                    "version_segment must be a single non-empty path segment, got {:?}",
                    segment
                )));
            }
        }
        Ok(())
    }

    pub fn routes(&self) -> InlineRoutes {
        InlineRoutes::new(self.area.clone(), self.version_segment.clone())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

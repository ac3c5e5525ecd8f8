//! Declarative asset injection.
//!
//! Controllers and actions declare the assets they need. Before an action
//! runs, an interceptor feeds those declarations into the page through the
//! same public add operations templates use. Controller-level declarations
//! are applied first, so at equal positions they render before the action's.

use crate::error::Result;
use crate::page::PageAssets;
use pagebundle_api::{DEFAULT_POSITION, Position, Zone};
use serde::{Deserialize, Serialize};

/// An ordered list of paths for one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDeclaration {
    pub zone: Zone,
    pub paths: Vec<String>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl AssetDeclaration {
    pub fn new(zone: Zone, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            zone,
            paths: paths.into_iter().map(Into::into).collect(),
            position: None,
        }
    }

    pub fn styles(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(Zone::Styles, paths)
    }

    pub fn head_scripts(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(Zone::HeadScripts, paths)
    }

    pub fn body_scripts(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(Zone::BodyScripts, paths)
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Static description of a unit of work about to execute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub controller: String,
    pub action: String,
    pub parameter_types: Vec<String>,
    pub controller_assets: Vec<AssetDeclaration>,
    pub action_assets: Vec<AssetDeclaration>,
}

impl ActionDescriptor {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn with_parameters(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.parameter_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn controller_declares(mut self, declaration: AssetDeclaration) -> Self {
        self.controller_assets.push(declaration);
        self
    }

    pub fn action_declares(mut self, declaration: AssetDeclaration) -> Self {
        self.action_assets.push(declaration);
        self
    }

    /// `Controller.Action(ParamType, ...)`
    pub fn provenance(&self) -> String {
        format!(
            "{}.{}({})",
            self.controller,
            self.action,
            self.parameter_types.join(", ")
        )
    }

    /// Declarations in application order, outer scope first.
    pub fn declarations(&self) -> impl Iterator<Item = &AssetDeclaration> {
        self.controller_assets.iter().chain(self.action_assets.iter())
    }
}

/// Hook run before an action executes.
pub trait ActionInterceptor: Send + Sync {
    fn before_action(&self, page: &mut PageAssets<'_>, action: &ActionDescriptor) -> Result<()>;
}

/// Feeds an action's declared assets into the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetInjector;

impl ActionInterceptor for AssetInjector {
    fn before_action(&self, page: &mut PageAssets<'_>, action: &ActionDescriptor) -> Result<()> {
        let source = action.provenance();
        for declaration in action.declarations() {
            let position = declaration.position.unwrap_or(DEFAULT_POSITION);
            for path in &declaration.paths {
                page.add_path(declaration.zone, path, position, Some(source.clone()))?;
            }
        }
        Ok(())
    }
}

/// Run every interceptor, then the action itself.
pub fn run_action<T>(
    interceptors: &[&dyn ActionInterceptor],
    page: &mut PageAssets<'_>,
    action: &ActionDescriptor,
    body: impl FnOnce(&mut PageAssets<'_>) -> T,
) -> Result<T> {
    for interceptor in interceptors {
        interceptor.before_action(page, action)?;
    }
    Ok(body(page))
}

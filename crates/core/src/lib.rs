pub mod error;
pub mod logging;
pub mod config;

pub mod bundle;
pub mod inject;
pub mod inline;
pub mod markup;
pub mod page;
pub mod registry;
pub mod strip;

pub use error::{PageBundleError, Result};
pub use page::{AssetEnvironment, PageAssets};

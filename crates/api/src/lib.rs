pub mod bundle;
pub mod error;
pub mod inline;
pub mod models;

// Re-export commonly used types
pub use bundle::BundleResolver;
pub use error::{ApiError, ApiResult};
pub use inline::InlineContentService;
pub use models::*;

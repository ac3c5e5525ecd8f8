pub mod asset;
pub mod inline;

pub use asset::*;
pub use inline::*;

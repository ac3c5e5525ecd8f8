#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unresolved asset path: {0}")]
    UnresolvedPath(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid addon token: {0}")]
    InvalidToken(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

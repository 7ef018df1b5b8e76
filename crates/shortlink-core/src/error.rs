use thiserror::Error;

/// Result type for short link store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the short link store.
///
/// Each variant is a distinct failure mode that callers branch on; the
/// message payload is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("short code already exists: {0}")]
    ShortCodeCollision(String),
    #[error("could not generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    #[error("short code not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// A stable, machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::InvalidUrl(_) => "invalid_url",
            StoreError::InvalidValidity(_) => "invalid_validity",
            StoreError::InvalidShortCode(_) => "invalid_shortcode",
            StoreError::ShortCodeCollision(_) => "shortcode_collision",
            StoreError::GenerationExhausted { .. } => "generation_exhausted",
            StoreError::NotFound(_) => "not_found",
        }
    }
}

//! Error types for the similarity engine

use player_store::StoreError;
use thiserror::Error;

/// Result type for similarity engine operations
pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Errors surfaced to callers of the similarity engine
///
/// An empty peer cohort, a null comparison range and zero-variance stat
/// columns are not errors: they produce empty results or are recovered locally.
#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No stats found for player: {0}")]
    NoStats(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data store error: {0}")]
    Store(#[from] StoreError),
}

impl SimilarityError {
    /// Whether the caller should report this as a missing player (404-equivalent)
    pub fn is_not_found(&self) -> bool {
        matches!(self, SimilarityError::PlayerNotFound(_) | SimilarityError::NoStats(_))
    }
}

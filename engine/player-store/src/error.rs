//! Error types for the player store

use thiserror::Error;

/// Result type for player store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading or indexing a dataset
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate season record for player {player_id} in {season}")]
    DuplicateSeason { player_id: String, season: i32 },

    #[error("Duplicate profile for player {0}")]
    DuplicateProfile(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

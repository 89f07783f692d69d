//! # Similarity Engine
//!
//! Ranks NFL players by how closely their career trajectory matches a target
//! player's. Three independent signals are combined into one score where
//! lower means more similar:
//!
//! - **Statistical distance**: Euclidean distance between position-weighted
//!   z-score vectors, averaged over the comparison window
//! - **Fantasy parity**: relative deviation in fantasy points per window unit
//! - **Draft parity**: closeness of overall and positional draft picks
//!
//! Careers are aligned either by age or by season number, and only players
//! who started their careers before the target are considered.

pub mod blend;
pub mod cli;
pub mod cohort;
pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod rank;
pub mod weights;
pub mod window;

pub use config::SimilarityConfig;
pub use engine::SimilarityEngine;
pub use error::{Result, SimilarityError};
pub use models::{ComparisonRow, SimilarPlayer, SimilarityRequest, SimilarityResult};
pub use weights::{PositionWeightTable, StatWeights};
pub use window::{ComparisonMode, ComparisonWindow};

#[cfg(test)]
mod tests;

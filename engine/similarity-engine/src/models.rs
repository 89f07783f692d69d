//! Request and response types of the engine facade

use crate::window::ComparisonMode;
use player_store::{PlayerProfile, StatLine};
use serde::{Deserialize, Serialize};

/// One `find_similar` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub player_id: String,
    #[serde(default)]
    pub mode: ComparisonMode,
    /// Defaults to the configured `default_max_results`
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Last season number to compare through (season-number mode only)
    #[serde(default)]
    pub through_season: Option<u32>,
}

impl SimilarityRequest {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            mode: ComparisonMode::default(),
            max_results: None,
            through_season: None,
        }
    }

    pub fn with_mode(mut self, mode: ComparisonMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn through_season(mut self, season: u32) -> Self {
        self.through_season = Some(season);
        self
    }
}

/// A ranked peer with its blended and component scores, rounded to 4 places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPlayer {
    pub player_id: String,
    pub name: String,
    pub similarity_score: f64,
    pub euclidean_score: Option<f64>,
    pub fantasy_score: Option<f64>,
    pub draft_score: Option<f64>,
}

/// Outcome of a `find_similar` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub target: PlayerProfile,
    /// Ascending by similarity score (most similar first)
    pub similar_players: Vec<SimilarPlayer>,
    pub comparison_mode: ComparisonMode,
    /// `(None, None)` when the target has no value in the mode's column
    pub comparison_range: (Option<i32>, Option<i32>),
    /// Dataset snapshot generation the result was computed against
    pub generation: u64,
}

impl SimilarityResult {
    pub fn is_empty(&self) -> bool {
        self.similar_players.is_empty()
    }
}

/// One season row in a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub player_id: String,
    pub name: String,
    pub is_target: bool,
    pub season: i32,
    pub season_number: u32,
    pub age: Option<i32>,
    pub position: String,
    pub stats: StatLine,
}

//! # Configuration Management
//!
//! Tunable constants of the similarity scoring pipeline. Defaults reproduce
//! the reference scoring exactly; change them only to recalibrate.

use crate::error::{Result, SimilarityError};
use crate::weights::PositionWeightTable;
use player_store::FantasyScoring;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the similarity engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Scoring format for fantasy parity
    pub fantasy_scoring: FantasyScoring,
    /// Component weights of the blended score
    pub blend: BlendWeights,
    /// Draft-capital parity constants
    pub draft: DraftParams,
    /// Peer eligibility rules
    pub cohort: CohortParams,
    /// Z-score settings
    pub normalization: NormalizationParams,
    /// Stat relevance per position
    pub position_weights: PositionWeightTable,
    /// Request bounds
    pub limits: RequestLimits,
    /// Logging setup for binaries
    pub logging: LoggingConfig,
}

/// Weights of the three components (lower blended score = more similar)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub euclidean: f64,
    pub fantasy: f64,
    pub draft: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self { euclidean: 0.4, fantasy: 0.4, draft: 0.2 }
    }
}

/// Draft-capital parity constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftParams {
    /// Pick distance at which overall-pick similarity reaches zero (32 teams x 7 rounds)
    pub pick_ceiling: f64,
    /// Position-pick distance at which positional similarity reaches zero
    pub position_pick_spread: f64,
    /// Score for an undrafted peer against a drafted target
    pub undrafted_peer_score: f64,
    /// Score for every peer when the target has no draft pick
    pub neutral_score: f64,
}

impl Default for DraftParams {
    fn default() -> Self {
        Self {
            pick_ceiling: 224.0,
            position_pick_spread: 15.0,
            undrafted_peer_score: 0.3,
            neutral_score: 0.5,
        }
    }
}

/// Peer eligibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortParams {
    /// Only compare against players whose careers began before the target's
    pub earlier_careers_only: bool,
}

impl Default for CohortParams {
    fn default() -> Self {
        Self { earlier_careers_only: true }
    }
}

/// Standard deviation flavour used for z-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    /// n - 1 denominator
    #[default]
    Sample,
    /// n denominator
    Population,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NormalizationParams {
    pub deviation: Deviation,
}

/// Request bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLimits {
    pub default_max_results: usize,
    pub max_results_cap: usize,
    pub max_through_season: u32,
    /// Shortest accepted player search query
    pub min_search_length: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self { default_max_results: 20, max_results_cap: 50, max_through_season: 20, min_search_length: 2 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl SimilarityConfig {
    /// Load configuration from a TOML file; missing sections take defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimilarityConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `SIMILARITY_*` environment overrides on top of this configuration
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_parse::<f64>("SIMILARITY_BLEND_EUCLIDEAN")? {
            self.blend.euclidean = value;
        }
        if let Some(value) = env_parse::<f64>("SIMILARITY_BLEND_FANTASY")? {
            self.blend.fantasy = value;
        }
        if let Some(value) = env_parse::<f64>("SIMILARITY_BLEND_DRAFT")? {
            self.blend.draft = value;
        }
        if let Some(value) = env_parse::<bool>("SIMILARITY_EARLIER_CAREERS_ONLY")? {
            self.cohort.earlier_careers_only = value;
        }
        if let Ok(level) = std::env::var("SIMILARITY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SIMILARITY_LOG_FORMAT") {
            self.logging.format = format;
        }
        self.validate()
    }

    /// Reject values that would make scores meaningless or NaN
    pub fn validate(&self) -> Result<()> {
        let blend = &self.blend;
        for (name, weight) in
            [("euclidean", blend.euclidean), ("fantasy", blend.fantasy), ("draft", blend.draft)]
        {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SimilarityError::Config(format!(
                    "blend weight {name} must be a non-negative number, got {weight}"
                )));
            }
        }

        let draft = &self.draft;
        if !(draft.pick_ceiling > 0.0) || !(draft.position_pick_spread > 0.0) {
            return Err(SimilarityError::Config(
                "draft pick_ceiling and position_pick_spread must be positive".to_string(),
            ));
        }
        for (name, score) in
            [("undrafted_peer_score", draft.undrafted_peer_score), ("neutral_score", draft.neutral_score)]
        {
            if !(0.0..=1.0).contains(&score) {
                return Err(SimilarityError::Config(format!(
                    "draft {name} must be within [0, 1], got {score}"
                )));
            }
        }

        let limits = &self.limits;
        if limits.max_results_cap == 0
            || limits.default_max_results == 0
            || limits.default_max_results > limits.max_results_cap
        {
            return Err(SimilarityError::Config(format!(
                "default_max_results ({}) must be within [1, {}]",
                limits.default_max_results, limits.max_results_cap
            )));
        }

        self.position_weights.validate().map_err(SimilarityError::Config)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SimilarityError::Config(format!("{key} has invalid value {raw:?}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_store::Position;

    #[test]
    fn test_defaults_match_reference_scoring() {
        let config = SimilarityConfig::default();
        assert_eq!(config.blend, BlendWeights { euclidean: 0.4, fantasy: 0.4, draft: 0.2 });
        assert_eq!(config.draft.pick_ceiling, 224.0);
        assert_eq!(config.draft.position_pick_spread, 15.0);
        assert_eq!(config.draft.undrafted_peer_score, 0.3);
        assert_eq!(config.draft.neutral_score, 0.5);
        assert!(config.cohort.earlier_careers_only);
        assert_eq!(config.normalization.deviation, Deviation::Sample);
        assert_eq!(config.position_weights.fallback, Position::WR);
        assert_eq!(config.limits.max_results_cap, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.toml");

        let mut config = SimilarityConfig::default();
        config.blend.draft = 0.3;
        config.position_weights.fallback = Position::TE;
        config.save_to_file(&path).unwrap();

        let loaded = SimilarityConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SimilarityConfig = toml::from_str(
            r#"
            [cohort]
            earlier_careers_only = false
            "#,
        )
        .unwrap();

        assert!(!config.cohort.earlier_careers_only);
        assert_eq!(config.blend, BlendWeights::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SimilarityConfig::default();
        config.blend.fantasy = -0.1;
        assert!(matches!(config.validate(), Err(SimilarityError::Config(_))));

        let mut config = SimilarityConfig::default();
        config.draft.position_pick_spread = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimilarityConfig::default();
        config.draft.undrafted_peer_score = 1.2;
        assert!(config.validate().is_err());

        let mut config = SimilarityConfig::default();
        config.limits.default_max_results = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        // Single test touches these variables to avoid cross-test races
        std::env::set_var("SIMILARITY_BLEND_DRAFT", "0.25");
        std::env::set_var("SIMILARITY_EARLIER_CAREERS_ONLY", "false");
        let config = SimilarityConfig::from_env().unwrap();
        assert_eq!(config.blend.draft, 0.25);
        assert!(!config.cohort.earlier_careers_only);

        std::env::set_var("SIMILARITY_BLEND_DRAFT", "lots");
        assert!(SimilarityConfig::from_env().is_err());

        std::env::remove_var("SIMILARITY_BLEND_DRAFT");
        std::env::remove_var("SIMILARITY_EARLIER_CAREERS_ONLY");
    }
}

//! # Similarity Engine
//!
//! Facade over the scoring pipeline. Every call takes one dataset snapshot
//! from the cache and computes against it start to finish:
//! cohort selection -> normalization -> distances -> blend -> rank.

use crate::blend::blend;
use crate::cohort::select_cohort;
use crate::config::SimilarityConfig;
use crate::distance::{draft_scores, euclidean_scores, fantasy_scores};
use crate::error::{Result, SimilarityError};
use crate::models::{ComparisonRow, SimilarityRequest, SimilarityResult};
use crate::normalize::normalize;
use crate::rank::rank;
use crate::window::{ComparisonMode, ComparisonWindow};
use player_store::{DatasetCache, PlayerProfile, PlayerSummary, Position, Snapshot};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Career-trajectory similarity engine
pub struct SimilarityEngine {
    config: SimilarityConfig,
    cache: Arc<DatasetCache>,
}

impl SimilarityEngine {
    /// Create an engine over a shared dataset cache
    pub fn new(config: SimilarityConfig, cache: Arc<DatasetCache>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, cache })
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<DatasetCache> {
        &self.cache
    }

    /// Rank the most similar earlier-career players to the requested target
    pub fn find_similar(&self, request: &SimilarityRequest) -> Result<SimilarityResult> {
        let max_results = self.validate_request(request)?;
        let snapshot = self.cache.snapshot()?;
        self.find_similar_in(&snapshot, request, max_results)
    }

    /// Run many requests in parallel against one snapshot; results keep request order
    pub fn find_similar_batch(
        &self,
        requests: &[SimilarityRequest],
    ) -> Result<Vec<Result<SimilarityResult>>> {
        let snapshot = self.cache.snapshot()?;
        let start = Instant::now();

        let results: Vec<Result<SimilarityResult>> = requests
            .par_iter()
            .map(|request| {
                let max_results = self.validate_request(request)?;
                self.find_similar_in(&snapshot, request, max_results)
            })
            .collect();

        info!(
            "Batch of {} similarity requests finished in {:?} (generation {})",
            requests.len(),
            start.elapsed(),
            snapshot.generation
        );
        Ok(results)
    }

    /// Profile of one player
    pub fn player_info(&self, player_id: &str) -> Result<PlayerProfile> {
        let snapshot = self.cache.snapshot()?;
        snapshot
            .dataset
            .profile(player_id)
            .cloned()
            .ok_or_else(|| SimilarityError::PlayerNotFound(player_id.to_string()))
    }

    /// Case-insensitive name search with an optional position filter
    pub fn search_players(
        &self,
        query: &str,
        position: Option<Position>,
    ) -> Result<Vec<PlayerSummary>> {
        let query = query.trim();
        let min_length = self.config.limits.min_search_length;
        if query.chars().count() < min_length {
            return Err(SimilarityError::InvalidRequest(format!(
                "search query must be at least {min_length} characters"
            )));
        }

        let snapshot = self.cache.snapshot()?;
        let matches = snapshot.dataset.search(query, position);
        debug!("Search {:?} matched {} players", query, matches.len());
        Ok(matches)
    }

    /// Season rows of the target and selected players, aligned on the mode's column
    ///
    /// Rows are ordered by the column ascending, target first within a value;
    /// rows without a value sort last. Unknown comparison ids are skipped.
    pub fn comparison_data(
        &self,
        target_id: &str,
        compare_ids: &[String],
        mode: ComparisonMode,
    ) -> Result<Vec<ComparisonRow>> {
        let snapshot = self.cache.snapshot()?;
        let dataset = &snapshot.dataset;
        if dataset.profile(target_id).is_none() {
            return Err(SimilarityError::PlayerNotFound(target_id.to_string()));
        }

        let mut ids: Vec<&str> = vec![target_id];
        let mut seen: BTreeSet<&str> = BTreeSet::from([target_id]);
        for id in compare_ids {
            if dataset.profile(id).is_none() {
                warn!("Skipping unknown player {} in comparison", id);
            } else if seen.insert(id.as_str()) {
                ids.push(id.as_str());
            }
        }

        let mut rows: Vec<ComparisonRow> = Vec::new();
        for id in ids {
            let name = dataset.profile(id).map(|p| p.name.clone()).unwrap_or_default();
            rows.extend(dataset.seasons_for(id).iter().map(|record| ComparisonRow {
                player_id: record.player_id.clone(),
                name: name.clone(),
                is_target: id == target_id,
                season: record.season,
                season_number: record.season_number,
                age: record.age,
                position: record.position.clone(),
                stats: record.stats.clone(),
            }));
        }

        let key = |row: &ComparisonRow| match mode {
            ComparisonMode::Age => row.age,
            ComparisonMode::SeasonNumber => Some(row.season_number as i32),
        };
        rows.sort_by(|a, b| {
            // None last, then target first, then stable by player
            (key(a).is_none(), key(a), !a.is_target, &a.player_id, a.season).cmp(&(
                key(b).is_none(),
                key(b),
                !b.is_target,
                &b.player_id,
                b.season,
            ))
        });
        Ok(rows)
    }

    /// Load a fresh snapshot from the source; returns its generation
    pub fn reload(&self) -> Result<u64> {
        Ok(self.cache.reload()?.generation)
    }

    /// Drop the cached snapshot; the next request reloads
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    fn validate_request(&self, request: &SimilarityRequest) -> Result<usize> {
        let limits = &self.config.limits;
        let max_results = request.max_results.unwrap_or(limits.default_max_results);
        if max_results == 0 || max_results > limits.max_results_cap {
            return Err(SimilarityError::InvalidRequest(format!(
                "max_results must be between 1 and {}, got {}",
                limits.max_results_cap, max_results
            )));
        }
        if let Some(through) = request.through_season {
            if through == 0 || through > limits.max_through_season {
                return Err(SimilarityError::InvalidRequest(format!(
                    "through_season must be between 1 and {}, got {}",
                    limits.max_through_season, through
                )));
            }
        }
        Ok(max_results)
    }

    fn find_similar_in(
        &self,
        snapshot: &Snapshot,
        request: &SimilarityRequest,
        max_results: usize,
    ) -> Result<SimilarityResult> {
        let start = Instant::now();
        let dataset = &snapshot.dataset;
        let player_id = request.player_id.as_str();
        let mode = request.mode;

        info!(
            "Finding players similar to {} by {} (max {}, through {:?})",
            player_id, mode, max_results, request.through_season
        );

        let target = dataset
            .profile(player_id)
            .ok_or_else(|| SimilarityError::PlayerNotFound(player_id.to_string()))?;
        let target_seasons = dataset.seasons_for(player_id);
        if target_seasons.is_empty() {
            return Err(SimilarityError::NoStats(player_id.to_string()));
        }

        let empty = |range: (Option<i32>, Option<i32>)| SimilarityResult {
            target: target.clone(),
            similar_players: Vec::new(),
            comparison_mode: mode,
            comparison_range: range,
            generation: snapshot.generation,
        };

        let Some(window) = ComparisonWindow::resolve(mode, target_seasons, request.through_season)
        else {
            warn!("No {} values for {}; returning empty result", mode, player_id);
            return Ok(empty((None, None)));
        };
        let range = (Some(window.min), Some(window.max));

        let Some(cohort) = select_cohort(dataset, target, window, &self.config.cohort) else {
            warn!(
                "No peers for {} cover {} {}..={}; returning empty result",
                player_id, mode, window.min, window.max
            );
            return Ok(empty(range));
        };

        let weights = self.config.position_weights.for_label(&target.position);
        let table = normalize(&cohort, weights, self.config.normalization.deviation);

        let euclidean = euclidean_scores(&table);
        let fantasy = fantasy_scores(&cohort, self.config.fantasy_scoring);
        let candidates: BTreeSet<&str> =
            euclidean.keys().chain(fantasy.keys()).map(String::as_str).collect();
        let draft = draft_scores(dataset, target, candidates, &self.config.draft);
        debug!(
            "{} peers in cohort: {} euclidean, {} fantasy, {} draft scores",
            cohort.peer_count(),
            euclidean.len(),
            fantasy.len(),
            draft.len()
        );

        let blended = blend(&euclidean, &fantasy, &draft, &self.config.blend, &self.config.draft);
        let similar_players = rank(blended, dataset, max_results);

        info!(
            "Found {} similar players for {} in {:?}",
            similar_players.len(),
            player_id,
            start.elapsed()
        );

        Ok(SimilarityResult {
            target: target.clone(),
            similar_players,
            comparison_mode: mode,
            comparison_range: range,
            generation: snapshot.generation,
        })
    }
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}

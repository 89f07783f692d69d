//! Peer cohort selection
//!
//! Restricts the full season table to players sharing the target's career
//! position whose careers started before the target's and who cover enough of
//! the comparison window.

use crate::config::CohortParams;
use crate::window::{ComparisonMode, ComparisonWindow};
use player_store::{Dataset, PlayerProfile, PlayerSeasonRecord};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// Target and peer season rows inside the comparison window
#[derive(Debug, Clone)]
pub struct PeerCohort<'a> {
    pub target: &'a PlayerProfile,
    pub window: ComparisonWindow,
    pub target_rows: Vec<&'a PlayerSeasonRecord>,
    /// Peer rows keyed by player id, each in career order
    pub peers: BTreeMap<&'a str, Vec<&'a PlayerSeasonRecord>>,
}

impl<'a> PeerCohort<'a> {
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Every row in the cohort, target first
    pub fn all_rows(&self) -> impl Iterator<Item = &'a PlayerSeasonRecord> + '_ {
        self.target_rows.iter().copied().chain(self.peers.values().flatten().copied())
    }
}

/// Distinct window values a peer must cover to be comparable
pub fn required_coverage(window: &ComparisonWindow) -> usize {
    match window.mode {
        // Partial careers would gain or lose ground from missing seasons
        ComparisonMode::SeasonNumber => window.unit_count(),
        ComparisonMode::Age => (window.unit_count() / 2).max(1),
    }
}

/// Select the peer cohort for `target`, or `None` when no peer qualifies
pub fn select_cohort<'a>(
    dataset: &'a Dataset,
    target: &'a PlayerProfile,
    window: ComparisonWindow,
    params: &CohortParams,
) -> Option<PeerCohort<'a>> {
    let target_rows: Vec<&PlayerSeasonRecord> = dataset
        .seasons_for(&target.player_id)
        .iter()
        .filter(|r| window.position_of(r).is_some())
        .collect();

    let eligible: HashSet<&str> = dataset
        .profiles()
        .iter()
        .filter(|p| p.player_id != target.player_id && p.position == target.position)
        .filter(|p| !params.earlier_careers_only || p.first_season < target.first_season)
        .map(|p| p.player_id.as_str())
        .collect();

    let mut candidates: BTreeMap<&str, Vec<&PlayerSeasonRecord>> = BTreeMap::new();
    for record in dataset.seasons() {
        // Career position decides eligibility; a relabelled season still counts
        if !eligible.contains(record.player_id.as_str()) || window.position_of(record).is_none() {
            continue;
        }
        candidates.entry(record.player_id.as_str()).or_default().push(record);
    }

    let required = required_coverage(&window);
    let considered = candidates.len();
    candidates.retain(|_, rows| {
        let covered: BTreeSet<i32> = rows.iter().filter_map(|r| window.position_of(r)).collect();
        covered.len() >= required
    });

    debug!(
        "Cohort for {}: {} eligible players, {} in window, {} cover >= {} of {} {} values",
        target.player_id,
        eligible.len(),
        considered,
        candidates.len(),
        required,
        window.unit_count(),
        window.mode
    );

    if candidates.is_empty() {
        return None;
    }

    Some(PeerCohort { target, window, target_rows, peers: candidates })
}

//! Distance calculators
//!
//! Three independent per-peer scores over the comparison window:
//! - statistical distance between weighted z-score vectors (lower = closer)
//! - relative fantasy-point deviation (lower = closer)
//! - draft-capital parity (higher = closer)

use crate::cohort::PeerCohort;
use crate::config::DraftParams;
use crate::normalize::ScaledTable;
use player_store::{Dataset, FantasyScoring, PlayerProfile};
use std::collections::BTreeMap;

/// Straight-line distance between two scaled stat vectors
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean per-unit statistical distance for every peer with a comparable unit
///
/// Peers sharing no window value with the target are absent from the result.
pub fn euclidean_scores(table: &ScaledTable<'_>) -> BTreeMap<String, f64> {
    let mut distances: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for unit in table.target_units() {
        let Some(target_row) = table.target_row(unit) else { continue };
        for (&peer_id, rows) in &table.peers {
            for row in rows.iter().filter(|r| r.unit == unit) {
                let distance = euclidean_distance(&row.scaled, &target_row.scaled);
                if distance.is_finite() {
                    distances.entry(peer_id).or_default().push(distance);
                }
            }
        }
    }

    distances
        .into_iter()
        .filter_map(|(id, d)| mean(&d).map(|score| (id.to_string(), score)))
        .collect()
}

/// Relative deviation of one unit's fantasy output, if comparable
///
/// Units where the target scored zero or has no value are not comparable.
pub fn fantasy_deviation(target_points: Option<f64>, peer_points: Option<f64>) -> Option<f64> {
    let target = target_points.filter(|p| p.is_finite() && *p != 0.0)?;
    let peer = peer_points.filter(|p| p.is_finite())?;
    Some((peer - target).abs() / target.max(1.0))
}

/// Mean relative fantasy deviation for every peer with a comparable unit
pub fn fantasy_scores(cohort: &PeerCohort<'_>, scoring: FantasyScoring) -> BTreeMap<String, f64> {
    let mut deviations: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    let mut units: Vec<i32> =
        cohort.target_rows.iter().filter_map(|r| cohort.window.position_of(r)).collect();
    units.sort_unstable();
    units.dedup();

    for unit in units {
        let Some(target_row) =
            cohort.target_rows.iter().find(|r| cohort.window.position_of(r) == Some(unit))
        else {
            continue;
        };
        let target_points = scoring.points(&target_row.stats);

        for (&peer_id, rows) in &cohort.peers {
            for row in rows.iter().filter(|r| cohort.window.position_of(r) == Some(unit)) {
                if let Some(deviation) = fantasy_deviation(target_points, scoring.points(&row.stats))
                {
                    deviations.entry(peer_id).or_default().push(deviation);
                }
            }
        }
    }

    deviations
        .into_iter()
        .filter_map(|(id, d)| mean(&d).map(|score| (id.to_string(), score)))
        .collect()
}

/// Draft-capital parity of one peer against the target, in [0, 1]
pub fn draft_score(target: &PlayerProfile, peer: &PlayerProfile, params: &DraftParams) -> f64 {
    let Some(target_pick) = target.draft_pick() else {
        return params.neutral_score;
    };
    let Some(peer_pick) = peer.draft_pick() else {
        return params.undrafted_peer_score;
    };

    let pick_gap = (f64::from(peer_pick) - f64::from(target_pick)).abs();
    let overall = (1.0 - pick_gap / params.pick_ceiling).max(0.0);

    let positional = match (target.draft_position_pick(), peer.draft_position_pick()) {
        (Some(t), Some(p)) => {
            let gap = (f64::from(p) - f64::from(t)).abs();
            (1.0 - gap / params.position_pick_spread).max(0.0)
        }
        _ => overall,
    };

    (overall + positional) / 2.0
}

/// Draft parity for each listed peer that has a profile
pub fn draft_scores<'p>(
    dataset: &Dataset,
    target: &PlayerProfile,
    peer_ids: impl IntoIterator<Item = &'p str>,
    params: &DraftParams,
) -> BTreeMap<String, f64> {
    peer_ids
        .into_iter()
        .filter_map(|id| dataset.profile(id))
        .map(|peer| (peer.player_id.clone(), draft_score(target, peer, params)))
        .collect()
}

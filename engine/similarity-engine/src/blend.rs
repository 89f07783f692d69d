//! Score blending
//!
//! Joins the three component maps into one row per candidate, imputes gaps
//! with the component's cohort mean, min-max scales the two distance
//! components and combines everything into a single lower-is-closer score.

use crate::config::{BlendWeights, DraftParams};
use std::collections::{BTreeMap, BTreeSet};

/// Component scores of one candidate after imputation
///
/// A component is `None` only when no candidate in the cohort has it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub euclidean: Option<f64>,
    pub fantasy: Option<f64>,
    pub draft: Option<f64>,
}

/// One candidate's blended score alongside its components
#[derive(Debug, Clone, PartialEq)]
pub struct BlendedScore {
    pub player_id: String,
    pub similarity: f64,
    pub components: ComponentScores,
}

fn finite_mean<'a>(values: impl Iterator<Item = &'a f64>) -> Option<f64> {
    let (sum, count) =
        values.filter(|v| v.is_finite()).fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Fill every candidate's value for one component, falling back to the mean
fn impute(ids: &[&str], scores: &BTreeMap<String, f64>) -> Vec<Option<f64>> {
    let fill = finite_mean(scores.values());
    ids.iter()
        .map(|id| scores.get(*id).copied().filter(|v| v.is_finite()).or(fill))
        .collect()
}

/// Min-max scale to [0, 1]; a column where every value ties maps to 0.5
fn min_max(values: &[Option<f64>]) -> Vec<f64> {
    let present = values.iter().flatten();
    let min = present.clone().copied().fold(f64::INFINITY, f64::min);
    let max = present.copied().fold(f64::NEG_INFINITY, f64::max);

    values
        .iter()
        .map(|value| match value {
            Some(v) if max > min => (v - min) / (max - min),
            Some(_) => 0.5,
            None => 0.0,
        })
        .collect()
}

/// Blend component maps into one score per candidate, in player-id order
///
/// Candidates are the union of the euclidean and fantasy maps; draft scores
/// only attach to existing candidates.
pub fn blend(
    euclidean: &BTreeMap<String, f64>,
    fantasy: &BTreeMap<String, f64>,
    draft: &BTreeMap<String, f64>,
    weights: &BlendWeights,
    draft_params: &DraftParams,
) -> Vec<BlendedScore> {
    let candidates: BTreeSet<&str> =
        euclidean.keys().chain(fantasy.keys()).map(String::as_str).collect();
    let ids: Vec<&str> = candidates.into_iter().collect();
    if ids.is_empty() {
        return Vec::new();
    }

    let euclidean_filled = impute(&ids, euclidean);
    let fantasy_filled = impute(&ids, fantasy);
    let draft_filled = impute(&ids, draft);

    let euclidean_norm = min_max(&euclidean_filled);
    let fantasy_norm = min_max(&fantasy_filled);

    ids.iter()
        .enumerate()
        .map(|(idx, id)| {
            let draft_score = draft_filled[idx].unwrap_or(draft_params.neutral_score);
            let similarity = weights.euclidean * euclidean_norm[idx]
                + weights.fantasy * fantasy_norm[idx]
                + weights.draft * (1.0 - draft_score);

            BlendedScore {
                player_id: id.to_string(),
                // Non-finite sorts last
                similarity: if similarity.is_finite() { similarity.max(0.0) } else { f64::MAX },
                components: ComponentScores {
                    euclidean: euclidean_filled[idx],
                    fantasy: fantasy_filled[idx],
                    draft: draft_filled[idx],
                },
            }
        })
        .collect()
}

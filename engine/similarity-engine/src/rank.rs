//! Ranking and presentation of blended scores

use crate::blend::BlendedScore;
use crate::models::SimilarPlayer;
use player_store::Dataset;

/// Round to 4 decimal places for presentation
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Sort ascending by similarity, keep the best `max_results`, and attach names
///
/// Equal scores keep player-id order so repeated calls rank identically.
pub fn rank(mut scores: Vec<BlendedScore>, dataset: &Dataset, max_results: usize) -> Vec<SimilarPlayer> {
    scores.sort_by(|a, b| {
        a.similarity.total_cmp(&b.similarity).then_with(|| a.player_id.cmp(&b.player_id))
    });
    scores.truncate(max_results);

    scores
        .into_iter()
        .map(|score| {
            let name = dataset
                .profile(&score.player_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            SimilarPlayer {
                name,
                similarity_score: round4(score.similarity),
                euclidean_score: score.components.euclidean.map(round4),
                fantasy_score: score.components.fantasy.map(round4),
                draft_score: score.components.draft.map(round4),
                player_id: score.player_id,
            }
        })
        .collect()
}

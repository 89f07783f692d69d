//! End-to-end scenarios for SimilarityEngine over a small fixture league

use std::sync::Arc;

use player_store::{
    DatasetCache, DraftRecord, InMemorySource, Position, RawDataset, RawPlayerRow, RawSeasonRow,
    StatLine,
};

use crate::config::SimilarityConfig;
use crate::{ComparisonMode, SimilarityEngine, SimilarityError, SimilarityRequest, SimilarityResult};

fn qb_line(scale: f64, season_number: u32) -> StatLine {
    let n = f64::from(season_number);
    StatLine {
        pass_yards: Some(scale * (3000.0 + 250.0 * n)),
        pass_tds: Some((scale * (20.0 + n)).round()),
        interceptions: Some(12.0 - n),
        rush_yards: Some(scale * 200.0),
        rush_tds: Some(2.0),
        fantasy_points_ppr: Some(scale * (250.0 + 10.0 * n)),
        ..Default::default()
    }
}

fn career(id: &str, first_season: i32, count: u32, scale: f64) -> Vec<RawSeasonRow> {
    (1..=count)
        .map(|n| RawSeasonRow {
            player_id: id.to_string(),
            season: first_season + n as i32 - 1,
            season_number: None,
            age: None,
            position: None,
            stats: qb_line(scale, n),
        })
        .collect()
}

fn player(
    id: &str,
    name: &str,
    position: &str,
    first_season: i32,
    seasons: i32,
    pick: Option<u32>,
) -> RawPlayerRow {
    RawPlayerRow {
        player_id: id.to_string(),
        name: name.to_string(),
        position: Some(position.to_string()),
        first_season: Some(first_season),
        last_season: Some(first_season + seasons - 1),
        birth_year: Some(first_season - 23),
        headshot_url: None,
        draft: pick.map(|pick| DraftRecord {
            draft_year: first_season,
            round: 1 + (pick - 1) / 32,
            pick,
            position_pick: None,
        }),
    }
}

/// Target QB "target" (2020-2025, 1st overall) and a cohort built around it:
/// - twin: identical stats by season number, also 1st overall; one season
///   row labelled WR
/// - mid / udfa: full six seasons with lower output; udfa undrafted
/// - short: two seasons only; gap: five seasons with a missed calendar year
/// - rookie_mate: same rookie class; rb: other position
/// - late_udfa: undrafted, starts 2021; no_birth: unknown birth year
/// - pioneer: only tight end; benchwarmer: profile without season rows
fn fixture() -> RawDataset {
    let mut seasons = Vec::new();
    seasons.extend(career("target", 2020, 6, 1.0));
    seasons.extend(career("twin", 2012, 6, 1.0));
    seasons.extend(career("mid", 2010, 6, 0.85));
    seasons.extend(career("udfa", 2008, 6, 0.6));
    seasons.extend(career("short", 2014, 2, 0.9));
    seasons.extend(career("rookie_mate", 2020, 6, 0.95));
    seasons.extend(career("rb", 2010, 6, 0.5));
    seasons.extend(career("late_udfa", 2021, 3, 0.7));
    seasons.extend(career("no_birth", 2022, 2, 0.8));
    seasons.extend(career("pioneer", 2005, 2, 0.4));

    // Sat out 2013: five seasons played across six calendar years
    for (idx, season) in [2011, 2012, 2014, 2015, 2016].into_iter().enumerate() {
        let number = idx as u32 + 1;
        seasons.push(RawSeasonRow {
            player_id: "gap".to_string(),
            season,
            season_number: Some(number),
            age: None,
            position: None,
            stats: qb_line(0.95, number),
        });
    }

    // Listed as a receiver for one season; still a career quarterback
    if let Some(row) = seasons.iter_mut().find(|r| r.player_id == "twin" && r.season == 2013) {
        row.position = Some("WR".to_string());
    }

    let mut no_birth = player("no_birth", "Chris Doyle", "QB", 2022, 2, Some(90));
    no_birth.birth_year = None;

    RawDataset {
        seasons,
        players: vec![
            player("target", "Marcus Hale", "QB", 2020, 6, Some(1)),
            player("twin", "Derek Hall", "QB", 2012, 6, Some(1)),
            player("mid", "Tom Brandt", "QB", 2010, 6, Some(40)),
            player("udfa", "Kyle Shaw", "QB", 2008, 6, None),
            player("short", "Evan Price", "QB", 2014, 2, Some(120)),
            player("gap", "Luis Ortega", "QB", 2011, 6, Some(75)),
            player("rookie_mate", "Sam Whitaker", "QB", 2020, 6, Some(10)),
            player("rb", "Andre Hayes", "RB", 2010, 6, Some(20)),
            player("late_udfa", "Nate Fisher", "QB", 2021, 3, None),
            no_birth,
            player("pioneer", "Walt Ruiz", "TE", 2005, 2, Some(150)),
            player("benchwarmer", "Ben Carter", "QB", 2019, 1, Some(200)),
        ],
    }
}

fn engine_with(config: SimilarityConfig) -> SimilarityEngine {
    let cache = Arc::new(DatasetCache::new(Box::new(InMemorySource::new(fixture()))));
    SimilarityEngine::new(config, cache).unwrap()
}

fn engine() -> SimilarityEngine {
    engine_with(SimilarityConfig::default())
}

fn ids(result: &SimilarityResult) -> Vec<&str> {
    result.similar_players.iter().map(|p| p.player_id.as_str()).collect()
}

fn find(result: &SimilarityResult, id: &str) -> crate::SimilarPlayer {
    result.similar_players.iter().find(|p| p.player_id == id).cloned().unwrap()
}

#[cfg(test)]
mod ranking_tests {
    use super::*;

    #[test]
    fn test_full_career_cohort_and_order() {
        let result = engine().find_similar(&SimilarityRequest::new("target")).unwrap();

        assert_eq!(result.target.player_id, "target");
        assert_eq!(result.comparison_mode, ComparisonMode::SeasonNumber);
        assert_eq!(result.comparison_range, (Some(1), Some(6)));

        let mut found = ids(&result);
        found.sort_unstable();
        assert_eq!(found, vec!["mid", "twin", "udfa"]);

        assert_eq!(result.similar_players[0].player_id, "twin");
        assert!(result.similar_players.iter().all(|p| p.similarity_score >= 0.0));
        assert!(result
            .similar_players
            .windows(2)
            .all(|w| w[0].similarity_score <= w[1].similarity_score));
    }

    #[test]
    fn test_identical_peer_scores_zero() {
        let result = engine().find_similar(&SimilarityRequest::new("target")).unwrap();
        let twin = find(&result, "twin");

        assert_eq!(twin.name, "Derek Hall");
        assert_eq!(twin.similarity_score, 0.0);
        assert_eq!(twin.euclidean_score, Some(0.0));
        assert_eq!(twin.fantasy_score, Some(0.0));
        // Both first overall and first quarterback taken
        assert_eq!(twin.draft_score, Some(1.0));

        let mid = find(&result, "mid");
        assert!(mid.similarity_score > 0.0);
        assert!(mid.euclidean_score.unwrap() > 0.0);
    }

    #[test]
    fn test_undrafted_peer_gets_fixed_draft_score() {
        let result = engine().find_similar(&SimilarityRequest::new("target")).unwrap();
        assert_eq!(find(&result, "udfa").draft_score, Some(0.3));
    }

    #[test]
    fn test_undrafted_target_is_neutral_for_everyone() {
        let result = engine().find_similar(&SimilarityRequest::new("late_udfa")).unwrap();

        assert!(!result.is_empty());
        assert!(ids(&result).contains(&"target"));
        assert!(result.similar_players.iter().all(|p| p.draft_score == Some(0.5)));
    }

    #[test]
    fn test_max_results_truncates() {
        let request = SimilarityRequest::new("target").with_max_results(2);
        let result = engine().find_similar(&request).unwrap();
        assert_eq!(result.similar_players.len(), 2);
        assert_eq!(result.similar_players[0].player_id, "twin");
    }

    #[test]
    fn test_relabelled_season_keeps_peer() {
        let engine = engine();
        let rows = engine
            .comparison_data("twin", &[], ComparisonMode::SeasonNumber)
            .unwrap();
        assert_eq!(rows[1].position, "WR");

        let result = engine.find_similar(&SimilarityRequest::new("target")).unwrap();
        assert_eq!(result.similar_players[0].player_id, "twin");
        assert_eq!(result.similar_players[0].similarity_score, 0.0);
    }

    #[test]
    fn test_contemporaries_are_opt_in() {
        let result = engine().find_similar(&SimilarityRequest::new("target")).unwrap();
        assert!(!ids(&result).contains(&"rookie_mate"));

        let mut config = SimilarityConfig::default();
        config.cohort.earlier_careers_only = false;
        let result = engine_with(config).find_similar(&SimilarityRequest::new("target")).unwrap();
        assert!(ids(&result).contains(&"rookie_mate"));
        assert!(!ids(&result).contains(&"target"));
    }

    #[test]
    fn test_other_positions_never_compared() {
        let mut config = SimilarityConfig::default();
        config.cohort.earlier_careers_only = false;
        let result = engine_with(config).find_similar(&SimilarityRequest::new("target")).unwrap();
        assert!(!ids(&result).contains(&"rb"));
        assert!(!ids(&result).contains(&"pioneer"));
    }
}

#[cfg(test)]
mod window_tests {
    use super::*;

    #[test]
    fn test_through_season_three_requires_each_season() {
        let request = SimilarityRequest::new("target").through_season(3);
        let result = engine().find_similar(&request).unwrap();

        assert_eq!(result.comparison_range, (Some(1), Some(3)));
        let found = ids(&result);
        assert!(found.contains(&"twin"));
        // Third season played in 2014 counts as season three
        assert!(found.contains(&"gap"));
        // No third season at all
        assert!(!found.contains(&"short"));
    }

    #[test]
    fn test_full_window_excludes_shorter_careers() {
        let result = engine().find_similar(&SimilarityRequest::new("target")).unwrap();
        let found = ids(&result);
        assert!(!found.contains(&"gap"));
        assert!(!found.contains(&"short"));
    }

    #[test]
    fn test_through_season_two_widens_cohort() {
        let request = SimilarityRequest::new("target").through_season(2);
        let result = engine().find_similar(&request).unwrap();

        assert_eq!(result.comparison_range, (Some(1), Some(2)));
        let found = ids(&result);
        assert!(found.contains(&"gap"));
        assert!(found.contains(&"short"));
    }

    #[test]
    fn test_age_mode_range_and_partial_overlap() {
        let request = SimilarityRequest::new("target").with_mode(ComparisonMode::Age);
        let result = engine().find_similar(&request).unwrap();

        assert_eq!(result.comparison_mode, ComparisonMode::Age);
        assert_eq!(result.comparison_range, (Some(23), Some(28)));
        let found = ids(&result);
        assert!(found.contains(&"twin"));
        // Five of six ages is enough
        assert!(found.contains(&"gap"));
        // Two of six is not
        assert!(!found.contains(&"short"));
    }

    #[test]
    fn test_null_age_range_is_empty_result() {
        let request = SimilarityRequest::new("no_birth").with_mode(ComparisonMode::Age);
        let result = engine().find_similar(&request).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.comparison_range, (None, None));
        assert_eq!(result.target.player_id, "no_birth");
    }

    #[test]
    fn test_empty_cohort_echoes_range() {
        let result = engine().find_similar(&SimilarityRequest::new("pioneer")).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.comparison_range, (Some(1), Some(2)));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_unknown_player() {
        let err = engine().find_similar(&SimilarityRequest::new("ghost")).unwrap_err();
        assert!(matches!(err, SimilarityError::PlayerNotFound(ref id) if id == "ghost"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_player_without_stats() {
        let err = engine().find_similar(&SimilarityRequest::new("benchwarmer")).unwrap_err();
        assert!(matches!(err, SimilarityError::NoStats(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_request_bounds() {
        let engine = engine();
        for request in [
            SimilarityRequest::new("target").with_max_results(0),
            SimilarityRequest::new("target").with_max_results(51),
            SimilarityRequest::new("target").through_season(0),
            SimilarityRequest::new("target").through_season(21),
        ] {
            assert!(matches!(
                engine.find_similar(&request),
                Err(SimilarityError::InvalidRequest(_))
            ));
        }

        assert!(engine
            .find_similar(&SimilarityRequest::new("target").with_max_results(50).through_season(20))
            .is_ok());
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn test_repeated_calls_are_identical() {
        let engine = engine();
        let request = SimilarityRequest::new("target").with_mode(ComparisonMode::Age);

        let first = engine.find_similar(&request).unwrap();
        let second = engine.find_similar(&request).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_batch_matches_single_requests() {
        let engine = engine();
        let requests = vec![
            SimilarityRequest::new("target"),
            SimilarityRequest::new("ghost"),
            SimilarityRequest::new("late_udfa").with_max_results(3),
            SimilarityRequest::new("target").through_season(2),
        ];

        let results = engine.find_similar_batch(&requests).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results[1].is_err());

        for (request, result) in requests.iter().zip(&results) {
            if let Ok(result) = result {
                assert_eq!(result, &engine.find_similar(request).unwrap());
            }
        }
    }

    #[test]
    fn test_reload_and_invalidate_advance_generation() {
        let engine = engine();
        let request = SimilarityRequest::new("target");

        assert_eq!(engine.find_similar(&request).unwrap().generation, 1);
        assert_eq!(engine.reload().unwrap(), 2);
        assert_eq!(engine.find_similar(&request).unwrap().generation, 2);

        engine.invalidate();
        assert!(!engine.cache().is_loaded());
        assert_eq!(engine.find_similar(&request).unwrap().generation, 3);
    }
}

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn test_player_info() {
        let engine = engine();
        let profile = engine.player_info("gap").unwrap();
        assert_eq!(profile.name, "Luis Ortega");
        assert_eq!(profile.draft_pick(), Some(75));

        assert!(engine.player_info("ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_search_players() {
        let engine = engine();

        let names: Vec<_> =
            engine.search_players("HA", None).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Andre Hayes", "Derek Hall", "Kyle Shaw", "Marcus Hale"]);

        let quarterbacks = engine.search_players("ha", Some(Position::QB)).unwrap();
        assert_eq!(quarterbacks.len(), 3);

        assert!(matches!(
            engine.search_players(" h ", None),
            Err(SimilarityError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_comparison_data_alignment() {
        let engine = engine();
        let others = vec!["twin".to_string(), "ghost".to_string(), "twin".to_string()];
        let rows = engine.comparison_data("target", &others, ComparisonMode::SeasonNumber).unwrap();

        assert_eq!(rows.len(), 12);
        assert!(rows[0].is_target);
        assert_eq!(rows[0].season_number, 1);
        assert_eq!(rows[1].player_id, "twin");
        assert_eq!(rows[1].season_number, 1);
        assert!(rows.windows(2).all(|w| w[0].season_number <= w[1].season_number));

        assert!(engine
            .comparison_data("ghost", &others, ComparisonMode::Age)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_comparison_rows_without_age_sort_last() {
        let engine = engine();
        let rows = engine
            .comparison_data("target", &["no_birth".to_string()], ComparisonMode::Age)
            .unwrap();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].age, Some(23));
        assert!(rows[6..].iter().all(|r| r.age.is_none() && r.player_id == "no_birth"));
    }
}

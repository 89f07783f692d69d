use crate::error::{Result, StoreError};
use crate::types::{
    PlayerProfile, PlayerSeasonRecord, PlayerSummary, Position, RawDataset, RawPlayerRow,
    RawSeasonRow,
};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use tracing::{debug, warn};

/// Immutable, indexed snapshot of season and profile rows
///
/// Built once from a [`RawDataset`]; derived columns (season number, age,
/// career span, profile position, draft position-pick) are filled at build
/// time so the scoring pipeline only ever reads.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Sorted by player id
    profiles: Vec<PlayerProfile>,
    profile_index: HashMap<String, usize>,

    /// Grouped by player id, each group in career order
    seasons: Vec<PlayerSeasonRecord>,
    season_ranges: HashMap<String, Range<usize>>,
}

impl Dataset {
    /// Build a snapshot, validating uniqueness and deriving missing columns
    pub fn from_raw(raw: RawDataset) -> Result<Self> {
        let mut players: BTreeMap<String, RawPlayerRow> = BTreeMap::new();
        for row in raw.players {
            if players.contains_key(&row.player_id) {
                return Err(StoreError::DuplicateProfile(row.player_id));
            }
            players.insert(row.player_id.clone(), row);
        }

        let mut grouped: BTreeMap<String, Vec<RawSeasonRow>> = BTreeMap::new();
        let mut orphaned = 0usize;
        for row in raw.seasons {
            if !players.contains_key(&row.player_id) {
                orphaned += 1;
                continue;
            }
            grouped.entry(row.player_id.clone()).or_default().push(row);
        }
        if orphaned > 0 {
            warn!("Dropped {} season rows with no matching player profile", orphaned);
        }

        let mut profiles = Vec::with_capacity(players.len());
        let mut seasons = Vec::new();
        let mut season_ranges = HashMap::new();

        for (player_id, player) in players {
            let mut rows = grouped.remove(&player_id).unwrap_or_default();
            rows.sort_by_key(|r| r.season);
            for pair in rows.windows(2) {
                if pair[0].season == pair[1].season {
                    return Err(StoreError::DuplicateSeason {
                        player_id: player_id.clone(),
                        season: pair[0].season,
                    });
                }
            }

            let profile = build_profile(player, &rows)?;

            let start = seasons.len();
            for (idx, row) in rows.into_iter().enumerate() {
                let career_order = idx as u32 + 1;
                // Season numbers count seasons played: 1, 2, 3, ... in season order
                if let Some(supplied) = row.season_number {
                    if supplied != career_order {
                        return Err(StoreError::InvalidRecord(format!(
                            "player {} season {} has season_number {}, expected {}",
                            player_id, row.season, supplied, career_order
                        )));
                    }
                }
                seasons.push(PlayerSeasonRecord {
                    player_id: row.player_id,
                    season: row.season,
                    season_number: career_order,
                    age: row.age.or_else(|| profile.birth_year.map(|b| row.season - b)),
                    position: row.position.unwrap_or_else(|| profile.position.clone()),
                    stats: row.stats,
                });
            }
            season_ranges.insert(player_id, start..seasons.len());
            profiles.push(profile);
        }

        assign_position_picks(&mut profiles);

        let profile_index =
            profiles.iter().enumerate().map(|(idx, p)| (p.player_id.clone(), idx)).collect();

        debug!("Indexed {} profiles and {} season rows", profiles.len(), seasons.len());

        Ok(Self { profiles, profile_index, seasons, season_ranges })
    }

    /// Get a profile by player id
    pub fn profile(&self, player_id: &str) -> Option<&PlayerProfile> {
        self.profile_index.get(player_id).map(|&idx| &self.profiles[idx])
    }

    /// All profiles, sorted by player id
    pub fn profiles(&self) -> &[PlayerProfile] {
        &self.profiles
    }

    /// A player's season rows in career order (empty if unknown)
    pub fn seasons_for(&self, player_id: &str) -> &[PlayerSeasonRecord] {
        self.season_ranges
            .get(player_id)
            .map(|range| &self.seasons[range.clone()])
            .unwrap_or(&[])
    }

    /// Every season row, grouped by player id
    pub fn seasons(&self) -> &[PlayerSeasonRecord] {
        &self.seasons
    }

    pub fn player_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn season_count(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Case-insensitive substring search on name, sorted by name
    pub fn search(&self, query: &str, position: Option<Position>) -> Vec<PlayerSummary> {
        let query_lower = query.to_lowercase();
        let mut matches: Vec<&PlayerProfile> = self
            .profiles
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&query_lower))
            .filter(|p| position.map_or(true, |pos| p.position == pos.as_str()))
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.player_id.cmp(&b.player_id)));
        matches.into_iter().map(PlayerProfile::summary).collect()
    }
}

fn build_profile(player: RawPlayerRow, rows: &[RawSeasonRow]) -> Result<PlayerProfile> {
    let position = match player.position {
        Some(position) => position,
        None => most_common_position(rows).ok_or_else(|| {
            StoreError::InvalidRecord(format!("player {} has no position", player.player_id))
        })?,
    };

    let first_season = player.first_season.or_else(|| rows.first().map(|r| r.season));
    let last_season = player.last_season.or_else(|| rows.last().map(|r| r.season));
    let (Some(first_season), Some(last_season)) = (first_season, last_season) else {
        return Err(StoreError::InvalidRecord(format!(
            "player {} has no career span",
            player.player_id
        )));
    };
    if last_season < first_season {
        return Err(StoreError::InvalidRecord(format!(
            "player {} ends ({}) before starting ({})",
            player.player_id, last_season, first_season
        )));
    }

    Ok(PlayerProfile {
        player_id: player.player_id,
        name: player.name,
        position,
        first_season,
        last_season,
        birth_year: player.birth_year,
        headshot_url: player.headshot_url,
        draft: player.draft,
    })
}

/// Most frequent season position; ties go to the position played first
fn most_common_position(rows: &[RawSeasonRow]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for position in rows.iter().filter_map(|r| r.position.as_deref()) {
        match counts.iter_mut().find(|(p, _)| *p == position) {
            Some((_, count)) => *count += 1,
            None => counts.push((position, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (position, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((position, count));
        }
    }
    best.map(|(position, _)| position.to_string())
}

/// Fill missing position-picks: rank by overall pick within (draft year, position)
fn assign_position_picks(profiles: &mut [PlayerProfile]) {
    let mut classes: BTreeMap<(i32, String), Vec<(u32, usize)>> = BTreeMap::new();
    for (idx, profile) in profiles.iter().enumerate() {
        if let Some(draft) = &profile.draft {
            classes
                .entry((draft.draft_year, profile.position.clone()))
                .or_default()
                .push((draft.pick, idx));
        }
    }

    for picks in classes.values_mut() {
        picks.sort_unstable();
        for (rank, &(_, idx)) in picks.iter().enumerate() {
            if let Some(draft) = profiles[idx].draft.as_mut() {
                if draft.position_pick.is_none() {
                    draft.position_pick = Some(rank as u32 + 1);
                }
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of scaled stat columns carried by every season record
pub const STAT_CATEGORY_COUNT: usize = 10;

/// Skill positions with their own stat weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            other => Err(format!("unrecognized position: {other}")),
        }
    }
}

/// Stat columns compared between careers, in fixed column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    PassYards,
    PassTds,
    Interceptions,
    RushYards,
    RushTds,
    Receptions,
    ReceivingYards,
    ReceivingTds,
    Targets,
    FantasyPointsPpr,
}

impl StatCategory {
    pub const ALL: [StatCategory; STAT_CATEGORY_COUNT] = [
        StatCategory::PassYards,
        StatCategory::PassTds,
        StatCategory::Interceptions,
        StatCategory::RushYards,
        StatCategory::RushTds,
        StatCategory::Receptions,
        StatCategory::ReceivingYards,
        StatCategory::ReceivingTds,
        StatCategory::Targets,
        StatCategory::FantasyPointsPpr,
    ];

    /// Column index into fixed-size stat vectors
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StatCategory::PassYards => "pass_yards",
            StatCategory::PassTds => "pass_tds",
            StatCategory::Interceptions => "interceptions",
            StatCategory::RushYards => "rush_yards",
            StatCategory::RushTds => "rush_tds",
            StatCategory::Receptions => "receptions",
            StatCategory::ReceivingYards => "receiving_yards",
            StatCategory::ReceivingTds => "receiving_tds",
            StatCategory::Targets => "targets",
            StatCategory::FantasyPointsPpr => "fantasy_points_ppr",
        }
    }
}

/// Counting stats for one player-season. Any column may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub pass_yards: Option<f64>,
    #[serde(default)]
    pub pass_tds: Option<f64>,
    #[serde(default)]
    pub interceptions: Option<f64>,
    #[serde(default)]
    pub rush_yards: Option<f64>,
    #[serde(default)]
    pub rush_tds: Option<f64>,
    #[serde(default)]
    pub receptions: Option<f64>,
    #[serde(default)]
    pub receiving_yards: Option<f64>,
    #[serde(default)]
    pub receiving_tds: Option<f64>,
    #[serde(default)]
    pub targets: Option<f64>,
    #[serde(default)]
    pub fantasy_points_ppr: Option<f64>,
}

impl StatLine {
    pub fn get(&self, category: StatCategory) -> Option<f64> {
        let value = match category {
            StatCategory::PassYards => self.pass_yards,
            StatCategory::PassTds => self.pass_tds,
            StatCategory::Interceptions => self.interceptions,
            StatCategory::RushYards => self.rush_yards,
            StatCategory::RushTds => self.rush_tds,
            StatCategory::Receptions => self.receptions,
            StatCategory::ReceivingYards => self.receiving_yards,
            StatCategory::ReceivingTds => self.receiving_tds,
            StatCategory::Targets => self.targets,
            StatCategory::FantasyPointsPpr => self.fantasy_points_ppr,
        };
        // NaN in a feed is treated the same as a missing value
        value.filter(|v| v.is_finite())
    }

    /// All columns in `StatCategory::ALL` order
    pub fn values(&self) -> [Option<f64>; STAT_CATEGORY_COUNT] {
        StatCategory::ALL.map(|category| self.get(category))
    }
}

/// Fantasy scoring format used when comparing point production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FantasyScoring {
    #[default]
    Ppr,
    HalfPpr,
    Standard,
}

impl FantasyScoring {
    /// Points under this format, derived from the stored full-PPR total
    pub fn points(self, stats: &StatLine) -> Option<f64> {
        let ppr = stats.get(StatCategory::FantasyPointsPpr)?;
        let receptions = stats.get(StatCategory::Receptions).unwrap_or(0.0);
        Some(match self {
            FantasyScoring::Ppr => ppr,
            FantasyScoring::HalfPpr => ppr - 0.5 * receptions,
            FantasyScoring::Standard => ppr - receptions,
        })
    }
}

/// One player, one season, as served by the season statistics view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonRecord {
    /// GSIS ID (e.g., "00-0033873")
    pub player_id: String,

    /// Calendar year of the season
    pub season: i32,

    /// 1-based season index within the player's career
    pub season_number: u32,

    /// Season year minus birth year, if the birth year is known
    pub age: Option<i32>,

    /// Position played that season (e.g., "QB")
    pub position: String,

    pub stats: StatLine,
}

/// Where a player was drafted. Overall pick, round and year always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub draft_year: i32,
    pub round: u32,
    /// Overall pick number
    pub pick: u32,
    /// Nth player at the same position taken in that draft
    pub position_pick: Option<u32>,
}

/// One row per player, as served by the player profile view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: String,
    pub name: String,

    /// Most common position across the career
    pub position: String,

    pub first_season: i32,
    pub last_season: i32,

    pub birth_year: Option<i32>,
    pub headshot_url: Option<String>,

    /// None for undrafted players or when no draft data exists
    pub draft: Option<DraftRecord>,
}

impl PlayerProfile {
    pub fn seasons_played(&self) -> i32 {
        self.last_season - self.first_season + 1
    }

    pub fn draft_pick(&self) -> Option<u32> {
        self.draft.as_ref().map(|d| d.pick)
    }

    pub fn draft_position_pick(&self) -> Option<u32> {
        self.draft.as_ref().and_then(|d| d.position_pick)
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            player_id: self.player_id.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
            first_season: self.first_season,
            last_season: self.last_season,
            seasons_played: self.seasons_played(),
        }
    }
}

/// Lightweight listing row returned by player search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub first_season: i32,
    pub last_season: i32,
    pub seasons_played: i32,
}

/// Season row as delivered by a data source, before derived columns are filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeasonRow {
    pub player_id: String,
    pub season: i32,
    #[serde(default)]
    pub season_number: Option<u32>,
    #[serde(default)]
    pub age: Option<i32>,
    /// Falls back to the profile position when absent
    #[serde(default)]
    pub position: Option<String>,
    #[serde(flatten)]
    pub stats: StatLine,
}

/// Profile row as delivered by a data source, before derived columns are filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerRow {
    pub player_id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub first_season: Option<i32>,
    #[serde(default)]
    pub last_season: Option<i32>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub headshot_url: Option<String>,
    #[serde(default)]
    pub draft: Option<DraftRecord>,
}

/// Everything a data source hands over in one load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    pub seasons: Vec<RawSeasonRow>,
    pub players: Vec<RawPlayerRow>,
}

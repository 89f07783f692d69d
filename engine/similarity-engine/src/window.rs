use player_store::PlayerSeasonRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which career column two players are aligned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Same ages
    Age,
    /// Same Nth professional season
    #[default]
    #[value(name = "season_number", alias = "season-number")]
    SeasonNumber,
}

impl ComparisonMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::Age => "age",
            ComparisonMode::SeasonNumber => "season_number",
        }
    }

    /// The record's value in this mode's column
    pub fn key(self, record: &PlayerSeasonRecord) -> Option<i32> {
        match self {
            ComparisonMode::Age => record.age,
            ComparisonMode::SeasonNumber => Some(record.season_number as i32),
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "age" => Ok(ComparisonMode::Age),
            "season_number" | "season-number" => Ok(ComparisonMode::SeasonNumber),
            other => Err(format!("unknown comparison mode: {other}")),
        }
    }
}

/// Inclusive range of age or season-number values two careers are compared over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonWindow {
    pub mode: ComparisonMode,
    pub min: i32,
    pub max: i32,
}

impl ComparisonWindow {
    /// Window implied by the target's own season rows
    ///
    /// Season-number windows always start at 1 and end at the target's latest
    /// season, capped by `through_season`. Age windows span the target's known
    /// ages. Returns `None` when the target has no value in the mode's column.
    pub fn resolve(
        mode: ComparisonMode,
        target_rows: &[PlayerSeasonRecord],
        through_season: Option<u32>,
    ) -> Option<Self> {
        let keys = target_rows.iter().filter_map(|r| mode.key(r));
        match mode {
            ComparisonMode::SeasonNumber => {
                let latest = keys.max()?;
                let max = match through_season {
                    Some(cap) => latest.min(cap as i32),
                    None => latest,
                };
                Some(Self { mode, min: 1, max })
            }
            ComparisonMode::Age => {
                let (min, max) = keys.fold(None, |acc: Option<(i32, i32)>, age| match acc {
                    Some((lo, hi)) => Some((lo.min(age), hi.max(age))),
                    None => Some((age, age)),
                })?;
                Some(Self { mode, min, max })
            }
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// The record's column value, if it falls inside the window
    pub fn position_of(&self, record: &PlayerSeasonRecord) -> Option<i32> {
        self.mode.key(record).filter(|&v| self.contains(v))
    }

    /// Number of distinct values in the window
    pub fn unit_count(&self) -> usize {
        (self.max - self.min + 1).max(0) as usize
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }
}

//! Position-specific stat relevance weights
//!
//! Each z-scored stat column is multiplied by how much that stat matters for
//! the target's position, so a receiver's passing line never drives distance.

use player_store::{Position, StatCategory, STAT_CATEGORY_COUNT};
use serde::{Deserialize, Serialize};

/// Relevance of each stat column for one position, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatWeights {
    pub pass_yards: f64,
    pub pass_tds: f64,
    pub interceptions: f64,
    pub rush_yards: f64,
    pub rush_tds: f64,
    pub receptions: f64,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
    pub targets: f64,
    pub fantasy_points_ppr: f64,
}

impl StatWeights {
    pub fn get(&self, category: StatCategory) -> f64 {
        match category {
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
        }
    }

    /// Weights in `StatCategory::ALL` order
    pub fn as_array(&self) -> [f64; STAT_CATEGORY_COUNT] {
        StatCategory::ALL.map(|category| self.get(category))
    }

    pub fn quarterback() -> Self {
        Self {
            pass_yards: 1.0,
            pass_tds: 1.0,
            interceptions: 0.5,
            rush_yards: 0.3,
            rush_tds: 0.3,
            receptions: 0.0,
            receiving_yards: 0.0,
            receiving_tds: 0.0,
            targets: 0.0,
            fantasy_points_ppr: 0.5,
        }
    }

    pub fn running_back() -> Self {
        Self {
            pass_yards: 0.0,
            pass_tds: 0.0,
            interceptions: 0.0,
            rush_yards: 1.0,
            rush_tds: 1.0,
            receptions: 0.7,
            receiving_yards: 0.7,
            receiving_tds: 0.7,
            targets: 0.5,
            fantasy_points_ppr: 0.5,
        }
    }

    pub fn wide_receiver() -> Self {
        Self {
            pass_yards: 0.0,
            pass_tds: 0.0,
            interceptions: 0.0,
            rush_yards: 0.2,
            rush_tds: 0.2,
            receptions: 1.0,
            receiving_yards: 1.0,
            receiving_tds: 1.0,
            targets: 0.8,
            fantasy_points_ppr: 0.5,
        }
    }

    pub fn tight_end() -> Self {
        Self {
            rush_yards: 0.1,
            rush_tds: 0.1,
            ..Self::wide_receiver()
        }
    }

    /// Name of the first weight outside [0, 1], if any
    fn out_of_range(&self) -> Option<&'static str> {
        StatCategory::ALL
            .into_iter()
            .find(|&category| !(0.0..=1.0).contains(&self.get(category)))
            .map(StatCategory::name)
    }
}

/// Weight vectors for every skill position plus the fallback policy
///
/// Positions outside QB/RB/WR/TE (FB, K, or anything a feed invents) are
/// weighted as the `fallback` position, WR by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionWeightTable {
    pub fallback: Position,
    pub qb: StatWeights,
    pub rb: StatWeights,
    pub wr: StatWeights,
    pub te: StatWeights,
}

impl Default for PositionWeightTable {
    fn default() -> Self {
        Self {
            fallback: Position::WR,
            qb: StatWeights::quarterback(),
            rb: StatWeights::running_back(),
            wr: StatWeights::wide_receiver(),
            te: StatWeights::tight_end(),
        }
    }
}

impl PositionWeightTable {
    pub fn get(&self, position: Position) -> &StatWeights {
        match position {
            Position::QB => &self.qb,
            Position::RB => &self.rb,
            Position::WR => &self.wr,
            Position::TE => &self.te,
        }
    }

    /// Weights for a raw position label, using the fallback when unrecognized
    pub fn for_label(&self, label: &str) -> &StatWeights {
        match label.parse::<Position>() {
            Ok(position) => self.get(position),
            Err(_) => self.get(self.fallback),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for position in Position::ALL {
            if let Some(stat) = self.get(position).out_of_range() {
                return Err(format!("{position} weight for {stat} must be within [0, 1]"));
            }
        }
        Ok(())
    }
}

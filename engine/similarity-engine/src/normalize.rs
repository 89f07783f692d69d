//! Stat normalization
//!
//! Z-scores every stat column over the combined target + peer pool inside the
//! comparison window, then scales each column by the target position's weight.

use crate::cohort::PeerCohort;
use crate::config::Deviation;
use crate::weights::StatWeights;
use player_store::{PlayerSeasonRecord, StatCategory, STAT_CATEGORY_COUNT};
use std::collections::BTreeMap;
use tracing::debug;

/// Mean and standard deviation of one stat column across the pool
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStats {
    /// Stats over the present values; fewer than two values (sample) or one
    /// value (population) give a zero deviation
    pub fn from_values(values: &[f64], deviation: Deviation) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        // Constant columns get an exact zero deviation, free of rounding residue
        if values.iter().all(|&v| v == values[0]) {
            return Self { mean: values[0], std_dev: 0.0 };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let denominator = match deviation {
            Deviation::Sample => n - 1.0,
            Deviation::Population => n,
        };
        if denominator <= 0.0 {
            return Self { mean, std_dev: 0.0 };
        }
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / denominator;
        Self { mean, std_dev: variance.sqrt() }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.std_dev > 0.0 && self.std_dev.is_finite()) || !self.mean.is_finite()
    }

    /// Z-score of `value`; 0 for zero-variance columns
    pub fn z_score(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (value - self.mean) / self.std_dev
    }
}

/// A season row with its weighted z-scores; lives for one computation only
#[derive(Debug, Clone)]
pub struct ScaledStatRecord<'a> {
    pub record: &'a PlayerSeasonRecord,
    /// Value of the comparison column (age or season number)
    pub unit: i32,
    pub scaled: [f64; STAT_CATEGORY_COUNT],
}

/// Target and peers scaled against one shared mean/deviation per column
#[derive(Debug, Clone)]
pub struct ScaledTable<'a> {
    pub columns: [ColumnStats; STAT_CATEGORY_COUNT],
    pub target: Vec<ScaledStatRecord<'a>>,
    pub peers: BTreeMap<&'a str, Vec<ScaledStatRecord<'a>>>,
}

impl<'a> ScaledTable<'a> {
    /// The target's scaled row for a window value (first one if duplicated)
    pub fn target_row(&self, unit: i32) -> Option<&ScaledStatRecord<'a>> {
        self.target.iter().find(|r| r.unit == unit)
    }

    /// Distinct window values the target has rows for, ascending
    pub fn target_units(&self) -> Vec<i32> {
        let mut units: Vec<i32> = self.target.iter().map(|r| r.unit).collect();
        units.sort_unstable();
        units.dedup();
        units
    }
}

/// Scale every cohort row against the pooled column statistics
pub fn normalize<'a>(
    cohort: &PeerCohort<'a>,
    weights: &StatWeights,
    deviation: Deviation,
) -> ScaledTable<'a> {
    let mut pools: [Vec<f64>; STAT_CATEGORY_COUNT] = Default::default();
    for record in cohort.all_rows() {
        for (pool, value) in pools.iter_mut().zip(record.stats.values()) {
            if let Some(value) = value {
                pool.push(value);
            }
        }
    }

    let columns: [ColumnStats; STAT_CATEGORY_COUNT] =
        std::array::from_fn(|idx| ColumnStats::from_values(&pools[idx], deviation));

    for category in StatCategory::ALL {
        if columns[category.index()].is_degenerate() {
            debug!("Zero variance in {} across cohort; scaling to 0", category.name());
        }
    }

    let weights = weights.as_array();
    let scale = |record: &'a PlayerSeasonRecord| -> Option<ScaledStatRecord<'a>> {
        let unit = cohort.window.position_of(record)?;
        let values = record.stats.values();
        let scaled = std::array::from_fn(|idx| match values[idx] {
            // Missing stats sit at the origin
            Some(value) => columns[idx].z_score(value) * weights[idx],
            None => 0.0,
        });
        Some(ScaledStatRecord { record, unit, scaled })
    };

    let target = cohort.target_rows.iter().filter_map(|&r| scale(r)).collect();
    let peers = cohort
        .peers
        .iter()
        .map(|(&id, rows)| (id, rows.iter().filter_map(|&r| scale(r)).collect()))
        .collect();

    ScaledTable { columns, target, peers }
}

//! Comparison output structures

use serde::{Deserialize, Serialize};

use crate::projection::PayoffProjection;
use crate::strategy::Strategy;

/// Weight of one month saved relative to one currency unit of interest saved
pub const MONTH_SCORE_WEIGHT: f64 = 1000.0;

/// One evaluated strategy measured against the minimum-payment baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub strategy: Strategy,
    pub projection: PayoffProjection,

    /// Interest saved versus baseline, never negative
    pub savings: f64,

    /// Months earlier than baseline, never negative
    pub months_diff: u32,
}

impl StrategyComparison {
    pub fn against(baseline: &PayoffProjection, strategy: Strategy, projection: PayoffProjection) -> Self {
        let savings = (baseline.total_interest_paid - projection.total_interest_paid).max(0.0);
        let months_diff = baseline.total_months.saturating_sub(projection.total_months);
        Self {
            strategy,
            projection,
            savings,
            months_diff,
        }
    }

    /// Ranking score; months dominate marginal interest savings
    pub fn score(&self) -> f64 {
        self.savings + self.months_diff as f64 * MONTH_SCORE_WEIGHT
    }
}

/// Baseline plus every requested strategy and the advisory text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub baseline: PayoffProjection,
    pub strategies: Vec<StrategyComparison>,
    pub recommendations: Vec<String>,
}

impl ComparisonResult {
    /// Highest-scoring strategy; the first one wins ties
    pub fn best(&self) -> Option<&StrategyComparison> {
        best_strategy(&self.strategies)
    }
}

pub(crate) fn best_strategy(comparisons: &[StrategyComparison]) -> Option<&StrategyComparison> {
    comparisons.iter().fold(None, |best, current| match best {
        Some(b) if current.score() > b.score() => Some(current),
        Some(b) => Some(b),
        None => Some(current),
    })
}

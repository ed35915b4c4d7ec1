//! Runs the simulator once per strategy and scores each against a baseline

use log::debug;
use rayon::prelude::*;

use crate::cards::Card;
use crate::projection::ProjectionEngine;
use crate::strategy::Strategy;
use super::recommend::generate_recommendations;
use super::types::{ComparisonResult, StrategyComparison};

/// Compare strategies against the minimum-payment baseline.
///
/// The baseline is always computed, whether or not `minimum` is requested.
/// Strategies are simulated in parallel; results keep the requested order.
pub fn compare(engine: &ProjectionEngine, cards: &[Card], strategies: &[Strategy]) -> ComparisonResult {
    let baseline = engine.simulate(cards, &Strategy::minimum());

    let comparisons: Vec<StrategyComparison> = strategies
        .par_iter()
        .map(|strategy| {
            let projection = engine.simulate(cards, strategy);
            StrategyComparison::against(&baseline, strategy.clone(), projection)
        })
        .collect();

    for comparison in &comparisons {
        debug!(
            "{}: {} months, interest {:.2}, savings {:.2}",
            comparison.strategy.kind,
            comparison.projection.total_months,
            comparison.projection.total_interest_paid,
            comparison.savings
        );
    }

    let recommendations = generate_recommendations(cards, &baseline, &comparisons);

    ComparisonResult {
        baseline,
        strategies: comparisons,
        recommendations,
    }
}

/// Standard comparison set: minimum, plus the extra-payment strategies when a
/// budget is given
pub fn default_strategies(budget: Option<f64>) -> Vec<Strategy> {
    let mut strategies = vec![Strategy::minimum()];
    if let Some(budget) = budget.filter(|b| *b > 0.0) {
        strategies.push(Strategy::avalanche(Some(budget)));
        strategies.push(Strategy::snowball(Some(budget)));
        strategies.push(Strategy::hybrid(Some(budget)));
    }
    strategies
}

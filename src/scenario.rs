//! Checked entry point for projections and comparisons
//!
//! Validates card snapshots and strategies before handing them to the
//! engine, so the boundary layer sees `InvalidInput` instead of a silent
//! zero-month projection.

use log::info;
use std::collections::HashSet;

use crate::cards::Card;
use crate::comparison::{self, ComparisonResult};
use crate::error::{PlannerError, Result};
use crate::projection::{PayoffProjection, ProjectionConfig, ProjectionEngine};
use crate::strategy::{Strategy, StrategyKind};

/// Message returned when a calculation is requested with no cards
pub const NO_CARDS_MESSAGE: &str = "No cards found. Please add cards first.";

/// Runs validated projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let result = runner.compare_default(&cards, Some(500.0))?;
/// for line in &result.recommendations {
///     println!("{}", line);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner starting projections in the current month
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Simulate one strategy
    pub fn simulate(&self, cards: &[Card], strategy: &Strategy) -> Result<PayoffProjection> {
        validate_cards(cards)?;
        strategy.validate()?;

        let projection = self.engine.simulate(cards, strategy);
        info!(
            "Projected {} card(s) under {} from {}: {} months, interest {:.2}",
            cards.len(),
            strategy.kind,
            self.engine.config().start_date,
            projection.total_months,
            projection.total_interest_paid
        );
        Ok(projection)
    }

    /// Compare the given strategies against the minimum baseline
    pub fn compare(&self, cards: &[Card], strategies: &[Strategy]) -> Result<ComparisonResult> {
        validate_cards(cards)?;
        for strategy in strategies {
            strategy.validate()?;
        }

        let result = comparison::compare(&self.engine, cards, strategies);
        info!(
            "Compared {} strategies for {} card(s); {} recommendation(s)",
            strategies.len(),
            cards.len(),
            result.recommendations.len()
        );
        Ok(result)
    }

    /// Compare the standard strategy set for an optional total budget
    pub fn compare_default(&self, cards: &[Card], budget: Option<f64>) -> Result<ComparisonResult> {
        self.compare(cards, &comparison::default_strategies(budget))
    }

    /// Run one budget-driven strategy at several budgets
    pub fn run_budgets(
        &self,
        cards: &[Card],
        kind: StrategyKind,
        budgets: &[f64],
    ) -> Result<Vec<PayoffProjection>> {
        if !kind.uses_budget() {
            return Err(PlannerError::invalid(format!(
                "strategy {} does not take a monthly budget",
                kind
            )));
        }
        budgets
            .iter()
            .map(|&budget| self.simulate(cards, &Strategy::new(kind).with_budget(Some(budget))))
            .collect()
    }
}

/// Reject empty snapshots, duplicate ids and out-of-range fields
pub fn validate_cards(cards: &[Card]) -> Result<()> {
    if cards.is_empty() {
        return Err(PlannerError::invalid(NO_CARDS_MESSAGE));
    }

    let mut seen = HashSet::new();
    for card in cards {
        if !seen.insert(card.id.as_str()) {
            return Err(PlannerError::invalid(format!("duplicate card id: {}", card.id)));
        }
        card.validate()?;
    }
    Ok(())
}

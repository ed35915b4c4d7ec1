//! Core amortization engine for monthly payoff projections

use chrono::{Local, NaiveDate};
use log::debug;

use crate::cards::Card;
use crate::strategy::{allocate, PaymentMap, Strategy};
use super::state::{period_label, ProjectionState};
use super::steps::{CardMonth, MonthlyProjectionStep, PayoffProjection, Termination};
use super::MAX_PROJECTION_MONTHS;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Month 0 of the projection is the calendar month containing this date
    pub start_date: NaiveDate,

    /// Whether to keep per-card figures in each month
    pub detailed_output: bool,
}

impl ProjectionConfig {
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            ..Default::default()
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            start_date: Local::now().date_naive(),
            detailed_output: true,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Allocate payments for `strategy`, then run the monthly loop.
    ///
    /// An empty card set yields a zero-month projection; rejecting it is the
    /// caller's job.
    pub fn simulate(&self, cards: &[Card], strategy: &Strategy) -> PayoffProjection {
        let payments = allocate(cards, strategy);
        self.project(cards, &payments)
    }

    /// Run the monthly loop with a fixed payment map
    pub fn project(&self, cards: &[Card], payments: &PaymentMap) -> PayoffProjection {
        let mut state = ProjectionState::from_cards(cards);
        let mut steps = Vec::new();

        let termination = loop {
            if !state.has_active_debt() {
                break Termination::PaidOff;
            }
            if state.month >= MAX_PROJECTION_MONTHS {
                debug!(
                    "Projection stopped at horizon of {} months with {:.2} outstanding",
                    MAX_PROJECTION_MONTHS,
                    state.total_balance()
                );
                break Termination::Horizon;
            }

            let step = self.calculate_month(cards, payments, &mut state);
            let stagnant = state.month > 0 && step.is_stagnant();
            steps.push(step);
            state.advance_month();

            // Payments at or below interest everywhere; the debt would never shrink.
            if stagnant {
                debug!(
                    "Projection stagnated in month {} with {:.2} outstanding",
                    state.month - 1,
                    state.total_balance()
                );
                break Termination::Stagnation;
            }
        };

        PayoffProjection::from_steps(steps, self.config.start_date, termination)
    }

    /// Accrue interest and apply payments for one month, updating working balances
    fn calculate_month(
        &self,
        cards: &[Card],
        payments: &PaymentMap,
        state: &mut ProjectionState,
    ) -> MonthlyProjectionStep {
        let mut step = MonthlyProjectionStep::new(
            state.month,
            period_label(self.config.start_date, state.month),
        );

        for (idx, card) in cards.iter().enumerate() {
            let balance = state.balances[idx];
            if balance <= 0.0 {
                continue;
            }

            let payment = payments.at(idx);
            let interest = balance * card.monthly_rate();
            // Interest-only or negative amortization floors principal at 0.
            let principal = (payment - interest).min(balance).max(0.0);

            step.add_card(
                &card.id,
                CardMonth {
                    balance,
                    payment,
                    interest,
                    principal,
                },
                self.config.detailed_output,
            );

            state.balances[idx] = balance - principal;
        }

        step
    }
}

/// Simulate `strategy` starting in the month containing `start_date`
pub fn simulate(cards: &[Card], strategy: &Strategy, start_date: NaiveDate) -> PayoffProjection {
    ProjectionEngine::new(ProjectionConfig::starting(start_date)).simulate(cards, strategy)
}

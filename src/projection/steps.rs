//! Projection output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::DEBT_EPSILON;

/// One card's figures for a single month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CardMonth {
    /// Balance at the start of the month
    pub balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
}

/// A single simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjectionStep {
    /// Month index (0 = the start month)
    pub month: u32,

    /// Calendar month, `YYYY-MM`
    pub date: String,

    /// Per-card figures keyed by card id. Cards already paid off are absent.
    pub cards: BTreeMap<String, CardMonth>,

    pub total_balance: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}

impl MonthlyProjectionStep {
    pub fn new(month: u32, date: String) -> Self {
        Self {
            month,
            date,
            cards: BTreeMap::new(),
            total_balance: 0.0,
            total_payment: 0.0,
            total_interest: 0.0,
            total_principal: 0.0,
        }
    }

    /// Record a card's figures and fold them into the month totals
    pub fn add_card(&mut self, card_id: &str, figures: CardMonth, detailed: bool) {
        self.total_balance += figures.balance;
        self.total_payment += figures.payment;
        self.total_interest += figures.interest;
        self.total_principal += figures.principal;
        if detailed {
            self.cards.insert(card_id.to_string(), figures);
        }
    }

    /// No card's balance went down this month
    pub fn is_stagnant(&self) -> bool {
        self.total_principal == 0.0
    }
}

/// Why the monthly loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Termination {
    /// Every balance fell to the negligible-debt threshold
    #[default]
    PaidOff,
    /// The safety horizon was reached with debt remaining
    Horizon,
    /// A month produced no principal reduction
    Stagnation,
}

/// Complete simulation result for one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffProjection {
    /// Monthly steps in order
    pub projections: Vec<MonthlyProjectionStep>,

    pub total_months: u32,

    /// First day of the payoff month. When debt remains this is the month after
    /// the last recorded month and does not mean the debt was repaid; check
    /// `is_paid_off`.
    pub payoff_date: NaiveDate,

    pub total_interest_paid: f64,
    pub total_principal_paid: f64,

    /// Percentage (0-100) of all payments that reduced principal
    pub efficiency: u32,

    #[serde(default)]
    pub termination: Termination,
}

impl PayoffProjection {
    /// Derive the aggregate figures from the recorded months
    pub fn from_steps(
        projections: Vec<MonthlyProjectionStep>,
        start_date: NaiveDate,
        termination: Termination,
    ) -> Self {
        let total_interest_paid: f64 = projections.iter().map(|p| p.total_interest).sum();
        let total_principal_paid: f64 = projections.iter().map(|p| p.total_principal).sum();
        let efficiency = calculate_efficiency(&projections);
        let total_months = projections.len() as u32;

        let payoff_date = match projections.last() {
            Some(last) if last.total_balance <= DEBT_EPSILON => {
                super::state::period_start(start_date, last.month)
            }
            Some(last) => super::state::period_start(start_date, last.month + 1),
            None => start_date,
        };

        Self {
            projections,
            total_months,
            payoff_date,
            total_interest_paid,
            total_principal_paid,
            efficiency,
            termination,
        }
    }

    /// True only when the loop ended because all debt was repaid
    pub fn is_paid_off(&self) -> bool {
        self.termination == Termination::PaidOff
    }

    pub fn total_paid(&self) -> f64 {
        self.projections.iter().map(|p| p.total_payment).sum()
    }

    /// Balance carried out of the last recorded month
    pub fn remaining_balance(&self) -> f64 {
        self.projections
            .last()
            .map(|p| (p.total_balance - p.total_principal).max(0.0))
            .unwrap_or(0.0)
    }
}

/// Share of payments that became principal, rounded to a whole percent
fn calculate_efficiency(projections: &[MonthlyProjectionStep]) -> u32 {
    let total_principal: f64 = projections.iter().map(|p| p.total_principal).sum();
    let total_payment: f64 = projections.iter().map(|p| p.total_payment).sum();

    if total_payment == 0.0 {
        return 0;
    }

    (total_principal / total_payment * 100.0).round() as u32
}

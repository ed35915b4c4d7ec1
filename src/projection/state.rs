//! Working balances tracked during a single simulation

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::cards::Card;
use super::DEBT_EPSILON;

/// Private copy of card balances advanced month by month
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (0-indexed)
    pub month: u32,

    /// Working balance per card, in card input order
    pub balances: Vec<f64>,
}

impl ProjectionState {
    /// Initialize state from the cards' starting balances
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            month: 0,
            balances: cards.iter().map(|c| c.balance).collect(),
        }
    }

    /// True while any card owes more than the negligible-debt threshold
    pub fn has_active_debt(&self) -> bool {
        self.balances.iter().any(|&b| b > DEBT_EPSILON)
    }

    pub fn total_balance(&self) -> f64 {
        self.balances.iter().sum()
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.day0() as u64)
}

/// First day of the month `offset` months after the month containing `start`
pub fn period_start(start: NaiveDate, offset: u32) -> NaiveDate {
    month_start(start) + Months::new(offset)
}

/// Calendar label of a projection month (`YYYY-MM`)
pub fn period_label(start: NaiveDate, offset: u32) -> String {
    period_start(start, offset).format("%Y-%m").to_string()
}

//! Payment strategy selector and its wire format

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::cards::Card;
use crate::error::{PlannerError, Result};

/// Payment allocation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Every card receives exactly its minimum payment
    Minimum,
    /// Extra budget goes to the smallest balance first
    Snowball,
    /// Extra budget goes to the highest interest rate first
    Avalanche,
    /// Minimums first, then extra by highest rate (same allocation as avalanche)
    Hybrid,
    /// Caller-supplied amount per card, minimum payment otherwise
    Custom,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Minimum,
        StrategyKind::Snowball,
        StrategyKind::Avalanche,
        StrategyKind::Hybrid,
        StrategyKind::Custom,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Minimum => "minimum",
            StrategyKind::Snowball => "snowball",
            StrategyKind::Avalanche => "avalanche",
            StrategyKind::Hybrid => "hybrid",
            StrategyKind::Custom => "custom",
        }
    }

    /// Human-readable name used in recommendations and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::Minimum => "Minimum payments",
            StrategyKind::Snowball => "Snowball (smallest balance first)",
            StrategyKind::Avalanche => "Avalanche (highest rate first)",
            StrategyKind::Hybrid => "Hybrid (combined)",
            StrategyKind::Custom => "Custom",
        }
    }

    /// Whether `total_monthly_payment` affects the allocation
    pub fn uses_budget(&self) -> bool {
        matches!(
            self,
            StrategyKind::Snowball | StrategyKind::Avalanche | StrategyKind::Hybrid
        )
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimum" => Ok(StrategyKind::Minimum),
            "snowball" => Ok(StrategyKind::Snowball),
            "avalanche" => Ok(StrategyKind::Avalanche),
            "hybrid" => Ok(StrategyKind::Hybrid),
            "custom" => Ok(StrategyKind::Custom),
            other => {
                let expected: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.as_str()).collect();
                Err(PlannerError::invalid(format!(
                    "unknown strategy type: {} (expected one of {})",
                    other,
                    expected.join(", ")
                )))
            }
        }
    }
}

/// A strategy selection as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    #[serde(rename = "type")]
    pub kind: StrategyKind,

    /// Total monthly budget across all cards (snowball/avalanche/hybrid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_monthly_payment: Option<f64>,

    /// Card id -> payment amount (custom only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_payments: Option<BTreeMap<String, f64>>,
}

impl Strategy {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            total_monthly_payment: None,
            custom_payments: None,
        }
    }

    pub fn minimum() -> Self {
        Self::new(StrategyKind::Minimum)
    }

    pub fn snowball(budget: Option<f64>) -> Self {
        Self::new(StrategyKind::Snowball).with_budget(budget)
    }

    pub fn avalanche(budget: Option<f64>) -> Self {
        Self::new(StrategyKind::Avalanche).with_budget(budget)
    }

    pub fn hybrid(budget: Option<f64>) -> Self {
        Self::new(StrategyKind::Hybrid).with_budget(budget)
    }

    pub fn custom(payments: BTreeMap<String, f64>) -> Self {
        Self {
            kind: StrategyKind::Custom,
            total_monthly_payment: None,
            custom_payments: Some(payments),
        }
    }

    pub fn with_budget(mut self, budget: Option<f64>) -> Self {
        self.total_monthly_payment = budget;
        self
    }

    /// Budget used for extra-payment strategies.
    ///
    /// An absent or non-positive budget falls back to the sum of minimum
    /// payments, which leaves no extra to distribute.
    pub fn effective_budget(&self, cards: &[Card]) -> f64 {
        match self.total_monthly_payment {
            Some(budget) if budget > 0.0 => budget,
            _ => sum_min_payments(cards),
        }
    }

    /// Payment override for a card under the custom strategy
    pub fn custom_payment(&self, card_id: &str) -> Option<f64> {
        self.custom_payments
            .as_ref()
            .and_then(|payments| payments.get(card_id).copied())
    }

    /// Reject non-finite or negative amounts
    pub fn validate(&self) -> Result<()> {
        if let Some(budget) = self.total_monthly_payment {
            if !budget.is_finite() || budget < 0.0 {
                return Err(PlannerError::invalid(format!(
                    "total monthly payment must be a non-negative amount, got {}",
                    budget
                )));
            }
        }
        if let Some(payments) = &self.custom_payments {
            for (card_id, amount) in payments {
                if !amount.is_finite() || *amount < 0.0 {
                    return Err(PlannerError::invalid(format!(
                        "custom payment for card {} must be a non-negative amount, got {}",
                        card_id, amount
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::minimum()
    }
}

pub fn sum_min_payments(cards: &[Card]) -> f64 {
    cards.iter().map(|c| c.min_payment).sum()
}

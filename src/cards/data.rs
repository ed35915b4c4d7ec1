//! Credit card data structures matching the stored card format

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Currency assumed when a card does not carry one (amounts are never converted)
pub const DEFAULT_CURRENCY: &str = "RUB";

/// A single revolving-credit card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique card identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Current outstanding balance
    pub balance: f64,

    /// Annual interest rate in percent (24.0 = 24% APR)
    pub interest_rate: f64,

    /// Required minimum monthly payment
    pub min_payment: f64,

    /// Day of month the payment is due (1-31). Informational only.
    pub payment_date: u8,

    /// Grace period in days. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period: Option<u32>,

    /// Currency code; `DEFAULT_CURRENCY` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: f64,
        interest_rate: f64,
        min_payment: f64,
        payment_date: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            interest_rate,
            min_payment,
            payment_date,
            grace_period: None,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Monthly compounding rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }

    /// Interest accrued in one month on the current balance
    pub fn monthly_interest(&self) -> f64 {
        self.balance * self.monthly_rate()
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn validate(&self) -> Result<()> {
        validate_fields(
            &self.name,
            self.balance,
            self.interest_rate,
            self.min_payment,
            self.payment_date,
        )
    }
}

/// Card fields supplied when creating a card; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub name: String,
    pub balance: f64,
    pub interest_rate: f64,
    pub min_payment: f64,
    pub payment_date: u8,
    #[serde(default)]
    pub grace_period: Option<u32>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl NewCard {
    pub fn validate(&self) -> Result<()> {
        validate_fields(
            &self.name,
            self.balance,
            self.interest_rate,
            self.min_payment,
            self.payment_date,
        )
    }

    /// Attach an id, filling in `default_currency` when none was given
    pub fn into_card(self, id: String, default_currency: &str) -> Card {
        Card {
            id,
            name: self.name,
            balance: self.balance,
            interest_rate: self.interest_rate,
            min_payment: self.min_payment,
            payment_date: self.payment_date,
            grace_period: self.grace_period,
            currency: Some(self.currency.unwrap_or_else(|| default_currency.to_string())),
        }
    }
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub interest_rate: Option<f64>,
    #[serde(default)]
    pub min_payment: Option<f64>,
    #[serde(default)]
    pub payment_date: Option<u8>,
    #[serde(default)]
    pub grace_period: Option<u32>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CardPatch {
    /// Apply the patch to a copy of `card`. The id is never changed.
    pub fn apply_to(&self, card: &Card) -> Card {
        let mut updated = card.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(balance) = self.balance {
            updated.balance = balance;
        }
        if let Some(rate) = self.interest_rate {
            updated.interest_rate = rate;
        }
        if let Some(min_payment) = self.min_payment {
            updated.min_payment = min_payment;
        }
        if let Some(day) = self.payment_date {
            updated.payment_date = day;
        }
        if self.grace_period.is_some() {
            updated.grace_period = self.grace_period;
        }
        if let Some(currency) = &self.currency {
            updated.currency = Some(currency.clone());
        }
        updated
    }

    pub fn is_empty(&self) -> bool {
        *self == CardPatch::default()
    }
}

fn validate_fields(
    name: &str,
    balance: f64,
    interest_rate: f64,
    min_payment: f64,
    payment_date: u8,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PlannerError::invalid("card name must not be empty"));
    }
    if !balance.is_finite() || balance < 0.0 {
        return Err(PlannerError::invalid(format!(
            "balance must be a non-negative amount, got {}",
            balance
        )));
    }
    if !interest_rate.is_finite() || interest_rate < 0.0 {
        return Err(PlannerError::invalid(format!(
            "interest rate must be a non-negative percentage, got {}",
            interest_rate
        )));
    }
    if !min_payment.is_finite() || min_payment < 0.0 {
        return Err(PlannerError::invalid(format!(
            "minimum payment must be a non-negative amount, got {}",
            min_payment
        )));
    }
    if !(1..=31).contains(&payment_date) {
        return Err(PlannerError::invalid(format!(
            "payment date must be a day of month between 1 and 31, got {}",
            payment_date
        )));
    }
    Ok(())
}

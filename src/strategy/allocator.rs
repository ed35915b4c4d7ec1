//! Per-card monthly payment allocation
//!
//! The allocator runs once per simulation against the starting balances.
//! The resulting payment map stays fixed for every simulated month.

use std::cmp::Ordering;

use super::types::{sum_min_payments, Strategy, StrategyKind};
use crate::cards::Card;

/// Monthly payment per card, in card input order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentMap {
    entries: Vec<(String, f64)>,
}

impl PaymentMap {
    fn from_minimums(cards: &[Card]) -> Self {
        Self {
            entries: cards.iter().map(|c| (c.id.clone(), c.min_payment)).collect(),
        }
    }

    /// Payment assigned to a card, if the card was part of the allocation
    pub fn get(&self, card_id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| id == card_id)
            .map(|(_, amount)| *amount)
    }

    /// Payment at the given card position
    pub fn at(&self, index: usize) -> f64 {
        self.entries.get(index).map(|(_, amount)| *amount).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, amount)| (id.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all assigned payments
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }
}

/// Order in which cards absorb the extra budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Priority {
    SmallestBalance,
    HighestRate,
}

impl Priority {
    /// Card indices in priority order. Sorting is stable, so ties keep input order.
    fn order(&self, cards: &[Card]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..cards.len()).collect();
        match self {
            Priority::SmallestBalance => {
                indices.sort_by(|&a, &b| cmp_f64(cards[a].balance, cards[b].balance))
            }
            Priority::HighestRate => indices
                .sort_by(|&a, &b| cmp_f64(cards[b].interest_rate, cards[a].interest_rate)),
        }
        indices
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compute the monthly payment for every card under `strategy`
pub fn allocate(cards: &[Card], strategy: &Strategy) -> PaymentMap {
    match strategy.kind {
        StrategyKind::Minimum => PaymentMap::from_minimums(cards),
        StrategyKind::Snowball => {
            distribute_extra(cards, strategy.effective_budget(cards), Priority::SmallestBalance)
        }
        // Hybrid is allocation-identical to avalanche; the two differ only in reporting.
        StrategyKind::Avalanche | StrategyKind::Hybrid => {
            distribute_extra(cards, strategy.effective_budget(cards), Priority::HighestRate)
        }
        StrategyKind::Custom => PaymentMap {
            entries: cards
                .iter()
                .map(|c| {
                    let amount = strategy.custom_payment(&c.id).unwrap_or(c.min_payment);
                    (c.id.clone(), amount)
                })
                .collect(),
        },
    }
}

/// Minimums first, then the budget above the minimum sum goes to cards in priority
/// order, each taking at most its current balance.
fn distribute_extra(cards: &[Card], budget: f64, priority: Priority) -> PaymentMap {
    let mut payments = PaymentMap::from_minimums(cards);
    let mut remaining = (budget - sum_min_payments(cards)).max(0.0);

    for idx in priority.order(cards) {
        if remaining <= 0.0 {
            break;
        }
        let balance = cards[idx].balance;
        if balance > 0.0 {
            let additional = remaining.min(balance);
            payments.entries[idx].1 += additional;
            remaining -= additional;
        }
    }

    payments
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn two_cards() -> Vec<Card> {
        vec![
            Card::new("a", "A", 1000.0, 20.0, 50.0, 1),
            Card::new("b", "B", 2000.0, 10.0, 80.0, 1),
        ]
    }

    fn three_cards() -> Vec<Card> {
        let mut cards = two_cards();
        cards.push(Card::new("c", "C", 500.0, 15.0, 30.0, 1));
        cards
    }

    #[test]
    fn test_minimum_allocation() {
        let cards = two_cards();
        let payments = allocate(&cards, &Strategy::minimum());
        assert_eq!(payments.get("a"), Some(50.0));
        assert_eq!(payments.get("b"), Some(80.0));
        assert_eq!(payments.len(), 2);

        let order: Vec<&str> = payments.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert!(allocate(&[], &Strategy::avalanche(Some(100.0))).is_empty());
    }

    #[test]
    fn test_avalanche_favors_highest_rate() {
        let cards = two_cards();
        let payments = allocate(&cards, &Strategy::avalanche(Some(200.0)));
        assert_relative_eq!(payments.get("a").unwrap(), 120.0);
        assert_relative_eq!(payments.get("b").unwrap(), 80.0);
    }

    #[test]
    fn test_snowball_matches_avalanche_when_orders_agree() {
        let cards = two_cards();
        let snowball = allocate(&cards, &Strategy::snowball(Some(200.0)));
        let avalanche = allocate(&cards, &Strategy::avalanche(Some(200.0)));
        assert_eq!(snowball, avalanche);
    }

    #[test]
    fn test_smaller_third_card_flips_order() {
        let cards = three_cards();
        // minimums sum to 160, extra 40
        let snowball = allocate(&cards, &Strategy::snowball(Some(200.0)));
        assert_relative_eq!(snowball.get("c").unwrap(), 70.0);
        assert_relative_eq!(snowball.get("a").unwrap(), 50.0);

        let avalanche = allocate(&cards, &Strategy::avalanche(Some(200.0)));
        assert_relative_eq!(avalanche.get("a").unwrap(), 90.0);
        assert_relative_eq!(avalanche.get("c").unwrap(), 30.0);
    }

    #[test]
    fn test_hybrid_is_avalanche_alias() {
        let cards = three_cards();
        for budget in [None, Some(100.0), Some(250.0), Some(5000.0)] {
            assert_eq!(
                allocate(&cards, &Strategy::hybrid(budget)),
                allocate(&cards, &Strategy::avalanche(budget))
            );
        }
    }

    #[test]
    fn test_budget_below_minimums_equals_minimum() {
        let cards = three_cards();
        let minimum = allocate(&cards, &Strategy::minimum());
        for budget in [None, Some(50.0), Some(160.0)] {
            assert_eq!(allocate(&cards, &Strategy::snowball(budget)), minimum);
            assert_eq!(allocate(&cards, &Strategy::avalanche(budget)), minimum);
        }
    }

    #[test]
    fn test_extra_spills_to_next_card() {
        let cards = vec![
            Card::new("a", "A", 100.0, 30.0, 10.0, 1),
            Card::new("b", "B", 1000.0, 10.0, 20.0, 1),
        ];
        let payments = allocate(&cards, &Strategy::avalanche(Some(330.0)));
        // extra 300: 100 to a (capped at balance), 200 to b
        assert_relative_eq!(payments.get("a").unwrap(), 110.0);
        assert_relative_eq!(payments.get("b").unwrap(), 220.0);
    }

    #[test]
    fn test_allocation_sum_is_capped() {
        let cards = three_cards();
        let cap = 160.0 + 3500.0;
        for budget in [160.0, 300.0, 1000.0, 3660.0, 10_000.0] {
            for strategy in [
                Strategy::snowball(Some(budget)),
                Strategy::avalanche(Some(budget)),
                Strategy::hybrid(Some(budget)),
            ] {
                let total = allocate(&cards, &strategy).total();
                assert_relative_eq!(total, f64::min(budget, cap), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_balance_cards_skip_extra() {
        let cards = vec![
            Card::new("paid", "Paid", 0.0, 40.0, 0.0, 1),
            Card::new("b", "B", 1000.0, 10.0, 20.0, 1),
        ];
        let payments = allocate(&cards, &Strategy::avalanche(Some(120.0)));
        assert_relative_eq!(payments.get("paid").unwrap(), 0.0);
        assert_relative_eq!(payments.get("b").unwrap(), 120.0);
    }

    #[test]
    fn test_rate_ties_keep_input_order() {
        let cards = vec![
            Card::new("first", "First", 500.0, 20.0, 10.0, 1),
            Card::new("second", "Second", 500.0, 20.0, 10.0, 1),
        ];
        let payments = allocate(&cards, &Strategy::avalanche(Some(120.0)));
        assert_relative_eq!(payments.get("first").unwrap(), 110.0);
        assert_relative_eq!(payments.get("second").unwrap(), 10.0);

        let payments = allocate(&cards, &Strategy::snowball(Some(120.0)));
        assert_relative_eq!(payments.get("first").unwrap(), 110.0);
    }

    #[test]
    fn test_custom_falls_back_to_minimum() {
        let cards = two_cards();
        let mut custom = BTreeMap::new();
        custom.insert("b".to_string(), 300.0);
        custom.insert("unknown".to_string(), 999.0);

        let payments = allocate(&cards, &Strategy::custom(custom));
        assert_relative_eq!(payments.get("a").unwrap(), 50.0);
        assert_relative_eq!(payments.get("b").unwrap(), 300.0);
        assert_eq!(payments.get("unknown"), None);
    }
}

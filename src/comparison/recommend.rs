//! Advisory recommendations derived from a comparison

use crate::cards::Card;
use crate::projection::PayoffProjection;
use super::types::{best_strategy, StrategyComparison};

/// Baseline efficiency (percent) below which a larger budget is suggested
pub const MIN_EFFICIENCY_THRESHOLD: u32 = 50;

/// Share of the minimum payment that monthly interest may reach before a card
/// is flagged for priority payoff
pub const HIGH_INTEREST_SHARE: f64 = 0.5;

/// Build recommendation sentences. Absent triggers yield an empty list.
pub fn generate_recommendations(
    cards: &[Card],
    baseline: &PayoffProjection,
    comparisons: &[StrategyComparison],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(best) = best_strategy(comparisons) {
        if best.savings > 0.0 {
            let currency = cards.first().map(|c| c.currency()).unwrap_or_default();
            recommendations.push(format!(
                "Strategy \"{}\" can save {} {} in interest and shorten payoff by {} months",
                best.strategy.kind.display_name(),
                best.savings.round(),
                currency,
                best.months_diff,
            ));
        }
    }

    if baseline.efficiency < MIN_EFFICIENCY_THRESHOLD {
        recommendations.push(format!(
            "Current efficiency is {}%. Most of each payment goes to interest. \
             Consider raising the monthly payment budget.",
            baseline.efficiency
        ));
    }

    if let Some(card) = highest_rate_card(cards) {
        if card.balance > 0.0 && card.monthly_interest() > card.min_payment * HIGH_INTEREST_SHARE {
            recommendations.push(format!(
                "Card \"{}\" carries a high interest rate ({}%). Pay it down first.",
                card.name, card.interest_rate
            ));
        }
    }

    recommendations
}

/// Single max scan; a strictly higher rate is required to replace the
/// current pick, so the first card wins ties and 0% cards are never chosen.
fn highest_rate_card(cards: &[Card]) -> Option<&Card> {
    cards.iter().fold(None, |highest: Option<&Card>, card| {
        let current = highest.map(|h| h.interest_rate).unwrap_or(0.0);
        if card.interest_rate > current {
            Some(card)
        } else {
            highest
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{PayoffProjection, Termination};
    use crate::strategy::Strategy;
    use chrono::NaiveDate;

    fn projection(interest: f64, months: u32, efficiency: u32) -> PayoffProjection {
        let mut p = PayoffProjection::from_steps(
            Vec::new(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Termination::PaidOff,
        );
        p.total_interest_paid = interest;
        p.total_months = months;
        p.efficiency = efficiency;
        p
    }

    fn calm_card() -> Card {
        // 1000 at 12% accrues 10/month against a 100 minimum
        Card::new("a", "Calm", 1000.0, 12.0, 100.0, 1)
    }

    #[test]
    fn test_no_triggers_yield_empty_list() {
        let baseline = projection(500.0, 20, 80);
        let recs = generate_recommendations(&[calm_card()], &baseline, &[]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_best_strategy_named() {
        let baseline = projection(500.0, 20, 80);
        let comparisons = vec![
            StrategyComparison::against(&baseline, Strategy::snowball(Some(300.0)), projection(400.0, 15, 90)),
            StrategyComparison::against(&baseline, Strategy::avalanche(Some(300.0)), projection(350.4, 15, 90)),
        ];

        let recs = generate_recommendations(&[calm_card()], &baseline, &comparisons);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Avalanche (highest rate first)"));
        assert!(recs[0].contains("150 RUB"));
        assert!(recs[0].contains("5 months"));
    }

    #[test]
    fn test_months_outweigh_interest() {
        let baseline = projection(500.0, 20, 80);
        let comparisons = vec![
            StrategyComparison::against(&baseline, Strategy::snowball(Some(300.0)), projection(100.0, 19, 90)),
            StrategyComparison::against(&baseline, Strategy::avalanche(Some(300.0)), projection(499.0, 17, 90)),
        ];
        let recs = generate_recommendations(&[calm_card()], &baseline, &comparisons);
        assert!(recs[0].contains("Avalanche"));
    }

    #[test]
    fn test_no_savings_no_strategy_recommendation() {
        let baseline = projection(500.0, 20, 80);
        let comparisons = vec![StrategyComparison::against(
            &baseline,
            Strategy::minimum(),
            projection(500.0, 20, 80),
        )];
        let recs = generate_recommendations(&[calm_card()], &baseline, &comparisons);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_low_efficiency_warning() {
        let baseline = projection(500.0, 20, 35);
        let recs = generate_recommendations(&[calm_card()], &baseline, &[]);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("35%"));
    }

    #[test]
    fn test_high_interest_card_flagged() {
        let cards = vec![
            calm_card(),
            // 2000 at 30% accrues 50/month against a 60 minimum
            Card::new("b", "Platinum", 2000.0, 30.0, 60.0, 1),
        ];
        let recs = generate_recommendations(&cards, &projection(500.0, 20, 80), &[]);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Platinum"));
        assert!(recs[0].contains("30%"));
    }

    #[test]
    fn test_only_highest_rate_card_considered() {
        let cards = vec![
            // would trigger, but is not the highest-rate card
            Card::new("a", "Heavy", 10_000.0, 25.0, 100.0, 1),
            Card::new("b", "Light", 100.0, 26.0, 100.0, 1),
        ];
        let recs = generate_recommendations(&cards, &projection(500.0, 20, 80), &[]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_rate_tie_picks_first_card() {
        let cards = vec![
            Card::new("a", "First", 2000.0, 30.0, 60.0, 1),
            Card::new("b", "Second", 2000.0, 30.0, 60.0, 1),
        ];
        assert_eq!(highest_rate_card(&cards).unwrap().id, "a");

        let zero = vec![Card::new("z", "Zero", 100.0, 0.0, 10.0, 1)];
        assert!(highest_rate_card(&zero).is_none());
    }
}

//! Strategy comparison and recommendations

mod engine;
mod recommend;
mod types;

pub use engine::{compare, default_strategies};
pub use recommend::{generate_recommendations, HIGH_INTEREST_SHARE, MIN_EFFICIENCY_THRESHOLD};
pub use types::{ComparisonResult, StrategyComparison, MONTH_SCORE_WEIGHT};

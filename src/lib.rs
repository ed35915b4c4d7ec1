//! Payoff Planner - Credit-card debt payoff projections
//!
//! This library provides:
//! - Per-card payment allocation (minimum, snowball, avalanche, hybrid, custom)
//! - Month-by-month amortization with a 120-month safety horizon
//! - Strategy comparison against a minimum-payment baseline, with recommendations
//! - A small card store (in-memory or JSON file) and CSV import/export

pub mod cards;
pub mod comparison;
pub mod config;
pub mod error;
pub mod projection;
pub mod scenario;
pub mod store;
pub mod strategy;

// Re-export commonly used types
pub use cards::{Card, CardPatch, NewCard};
pub use comparison::{ComparisonResult, StrategyComparison};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use projection::{MonthlyProjectionStep, PayoffProjection, ProjectionConfig, ProjectionEngine};
pub use scenario::ScenarioRunner;
pub use store::{CardService, CardStore, FileStore, MemoryStore};
pub use strategy::{allocate, PaymentMap, Strategy, StrategyKind};

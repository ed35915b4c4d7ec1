//! Amortization simulator for multi-card payoff projections

mod engine;
mod state;
mod steps;
pub mod export;

pub use engine::{simulate, ProjectionConfig, ProjectionEngine};
pub use export::{export_projection, write_projection_csv};
pub use state::{period_label, period_start, ProjectionState};
pub use steps::{CardMonth, MonthlyProjectionStep, PayoffProjection, Termination};

/// Safety horizon: projections never run past ten years
pub const MAX_PROJECTION_MONTHS: u32 = 120;

/// Balances at or below this amount count as repaid
pub const DEBT_EPSILON: f64 = 0.01;

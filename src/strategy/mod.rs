//! Payment strategies and the per-card allocator

mod allocator;
mod types;

pub use allocator::{allocate, PaymentMap};
pub use types::{sum_min_payments, Strategy, StrategyKind};

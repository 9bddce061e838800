//! Balancing: read-only analysis of the count tables and the per-removal
//! rebalance state machine built on it.
//!
//! # Invariants
//! - Analysis never mutates the population.
//! - Each removal triggers at most one corrective action.
//! - Count tables are re-derived from the live items before any decision.

mod analyzer;
mod engine;

pub use analyzer::{BalanceAnalyzer, Direction, all_equal, extremal, overrepresented};
pub use engine::{RebalanceAction, RebalanceEngine, RebalanceResult};

pub fn crate_info() -> &'static str {
    "shapes-balance v0.1.0"
}

//! Developer Tooling: read-only views of the population for logs, CLIs and
//! tooltips.
//!
//! # Invariants
//! - Tools never mutate the population.

mod inspector;

pub use inspector::{ItemInfo, PopulationInspector, PopulationSummary};

pub fn crate_info() -> &'static str {
    "shapes-tools v0.1.0"
}

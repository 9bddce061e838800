//! Spawning: builds the initial population from configuration and is the
//! single entry point for population targets and removal notifications.
//!
//! # Invariants
//! - Initial colors cycle through the color vocabulary in order.
//! - Every random draw goes through a seeded generator, so a config and a
//!   seed fully determine the population.

mod config;
mod coordinator;
mod placement;
mod streams;
mod target;

pub use config::{ConfigError, SpawnConfig, SpawnRegion, TargetRange};
pub use coordinator::SpawnCoordinator;
pub use placement::{BoxPlacement, PlacementSource};
pub use streams::{PLACEMENT_STREAM, REMOVAL_STREAM, TARGET_STREAM, seeded_rng};
pub use target::TargetRoller;

pub fn crate_info() -> &'static str {
    "shapes-spawn v0.1.0"
}

//! Shared types: item handles, placements and the two item attributes.

mod types;

pub use types::{Attribute, ItemId, Placement};

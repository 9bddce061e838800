//! Population Kernel: vocabularies, live items and their count tables.
//!
//! # Invariants
//! - Every live item's kind and color are keys of their vocabulary.
//! - Outside an in-progress rebalance, each count table equals the number of
//!   live items carrying each category value.
//! - All state mutations flow through `PopulationStore` operations.

mod counts;
mod error;
mod population;
mod vocabulary;
mod visuals;

pub use counts::CountTable;
pub use error::PopulationError;
pub use population::{Item, ItemSpec, PopulationEvent, PopulationStore};
pub use visuals::{NullVisuals, RecordingVisuals, VisualCommand, VisualPort};
pub use vocabulary::{Category, Vocabularies, Vocabulary};

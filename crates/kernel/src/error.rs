use shapes_common::{Attribute, ItemId};

/// Errors from population bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PopulationError {
    #[error("item {0} is not a live member of the population")]
    NotFound(ItemId),
    #[error("population is empty")]
    EmptyPopulation,
    #[error("{attribute} {value:?} is not in the vocabulary")]
    VocabularyMismatch { attribute: Attribute, value: String },
    #[error("{0} vocabulary is empty")]
    EmptyVocabulary(Attribute),
    #[error("{attribute} {key:?} appears more than once in the vocabulary")]
    DuplicateCategory { attribute: Attribute, key: String },
}

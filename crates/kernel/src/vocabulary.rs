use serde::{Deserialize, Serialize};
use shapes_common::Attribute;

use crate::PopulationError;

/// One category value and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
}

impl Category {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Ordered, immutable set of valid values for one attribute.
///
/// Order matters: extremal tie-breaks and initial color cycling both walk the
/// vocabulary front to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    attribute: Attribute,
    entries: Vec<Category>,
}

impl Vocabulary {
    /// Build a vocabulary. Rejects empty lists and duplicate keys.
    pub fn new(attribute: Attribute, entries: Vec<Category>) -> Result<Self, PopulationError> {
        if entries.is_empty() {
            return Err(PopulationError::EmptyVocabulary(attribute));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(PopulationError::DuplicateCategory {
                    attribute,
                    key: entry.key.clone(),
                });
            }
        }
        Ok(Self { attribute, entries })
    }

    /// Vocabulary whose keys double as labels.
    pub fn from_labels(attribute: Attribute, labels: &[&str]) -> Result<Self, PopulationError> {
        Self::new(
            attribute,
            labels.iter().map(|l| Category::new(*l, *l)).collect(),
        )
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    /// Keys in vocabulary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Key at `index`, in vocabulary order.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.key.as_str())
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.label.as_str())
    }

    /// Closed-world check for values arriving from outside the store.
    pub fn check(&self, key: &str) -> Result<(), PopulationError> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(PopulationError::VocabularyMismatch {
                attribute: self.attribute,
                value: key.to_string(),
            })
        }
    }
}

/// The kind and color vocabularies, fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabularies {
    kinds: Vocabulary,
    colors: Vocabulary,
}

impl Vocabularies {
    pub fn new(kinds: Vocabulary, colors: Vocabulary) -> Self {
        debug_assert_eq!(kinds.attribute(), Attribute::Kind);
        debug_assert_eq!(colors.attribute(), Attribute::Color);
        Self { kinds, colors }
    }

    pub fn kinds(&self) -> &Vocabulary {
        &self.kinds
    }

    pub fn colors(&self) -> &Vocabulary {
        &self.colors
    }

    pub fn get(&self, attribute: Attribute) -> &Vocabulary {
        match attribute {
            Attribute::Kind => &self.kinds,
            Attribute::Color => &self.colors,
        }
    }
}

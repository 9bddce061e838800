use shapes_common::Attribute;

use crate::Vocabulary;

/// Per-category item counts for one attribute, in vocabulary order.
///
/// Every vocabulary value has an entry, zero included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    attribute: Attribute,
    counts: Vec<(String, usize)>,
}

impl CountTable {
    /// A table with every vocabulary value at zero.
    pub fn zeroed(vocabulary: &Vocabulary) -> Self {
        Self {
            attribute: vocabulary.attribute(),
            counts: vocabulary.keys().map(|k| (k.to_string(), 0)).collect(),
        }
    }

    /// Build a table directly from `(key, count)` pairs, in the given order.
    pub fn from_counts<'a>(
        attribute: Attribute,
        counts: impl IntoIterator<Item = (&'a str, usize)>,
    ) -> Self {
        Self {
            attribute,
            counts: counts
                .into_iter()
                .map(|(k, n)| (k.to_string(), n))
                .collect(),
        }
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Count for `key`; zero for values the table does not know.
    pub fn get(&self, key: &str) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// Number of categories (not items).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of items tallied.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub(crate) fn increment(&mut self, key: &str) {
        if let Some((_, n)) = self.counts.iter_mut().find(|(k, _)| k == key) {
            *n += 1;
        }
    }

    pub(crate) fn decrement(&mut self, key: &str) {
        if let Some((_, n)) = self.counts.iter_mut().find(|(k, _)| k == key) {
            *n = n.saturating_sub(1);
        }
    }

    pub(crate) fn reset(&mut self) {
        for (_, n) in &mut self.counts {
            *n = 0;
        }
    }
}

use serde::{Deserialize, Serialize};
use shapes_common::{Attribute, ItemId, Placement};
use std::collections::BTreeMap;

use crate::{CountTable, PopulationError, Vocabularies};

/// A live member of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: String,
    pub color: String,
    /// Opaque size metric, carried through replacements unchanged.
    pub size: f32,
    pub placement: Placement,
}

impl Item {
    /// The item's value for `attribute`.
    pub fn value(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Kind => &self.kind,
            Attribute::Color => &self.color,
        }
    }
}

/// Everything needed to add an item except its handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub kind: String,
    pub color: String,
    pub size: f32,
    pub placement: Placement,
}

impl ItemSpec {
    /// Spec whose size is derived from the placement scale.
    pub fn new(kind: impl Into<String>, color: impl Into<String>, placement: Placement) -> Self {
        Self {
            kind: kind.into(),
            color: color.into(),
            size: placement.size(),
            placement,
        }
    }
}

/// An event record produced by every mutation of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PopulationEvent {
    Added { item: Item },
    Removed { item: Item },
    Recolored { id: ItemId, old: String, new: String },
    Cleared { count: usize },
}

/// The live item collection plus its two derived count tables.
///
/// Items live in a `BTreeMap` keyed by monotonically issued handles, so
/// iteration is insertion order and is identical across runs.
#[derive(Debug, Clone)]
pub struct PopulationStore {
    vocabularies: Vocabularies,
    items: BTreeMap<ItemId, Item>,
    next_id: u64,
    kinds: CountTable,
    colors: CountTable,
    event_log: Vec<PopulationEvent>,
}

impl PopulationStore {
    /// Create an empty population over the given vocabularies.
    pub fn new(vocabularies: Vocabularies) -> Self {
        let kinds = CountTable::zeroed(vocabularies.kinds());
        let colors = CountTable::zeroed(vocabularies.colors());
        Self {
            vocabularies,
            items: BTreeMap::new(),
            next_id: 1,
            kinds,
            colors,
            event_log: Vec::new(),
        }
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Live items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn kind_counts(&self) -> &CountTable {
        &self.kinds
    }

    pub fn color_counts(&self) -> &CountTable {
        &self.colors
    }

    pub fn counts(&self, attribute: Attribute) -> &CountTable {
        match attribute {
            Attribute::Kind => &self.kinds,
            Attribute::Color => &self.colors,
        }
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[PopulationEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<PopulationEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Insert a new item and count it. Fails only when `spec` names a
    /// value outside the vocabularies.
    pub fn add(&mut self, spec: ItemSpec) -> Result<Item, PopulationError> {
        self.vocabularies.kinds().check(&spec.kind)?;
        self.vocabularies.colors().check(&spec.color)?;

        let id = ItemId(self.next_id);
        self.next_id += 1;
        let item = Item {
            id,
            kind: spec.kind,
            color: spec.color,
            size: spec.size,
            placement: spec.placement,
        };
        self.kinds.increment(&item.kind);
        self.colors.increment(&item.color);
        self.items.insert(id, item.clone());
        self.event_log.push(PopulationEvent::Added { item: item.clone() });
        Ok(item)
    }

    /// Remove a live item by handle and uncount it.
    pub fn remove(&mut self, id: ItemId) -> Result<Item, PopulationError> {
        let item = self
            .items
            .remove(&id)
            .ok_or(PopulationError::NotFound(id))?;
        self.kinds.decrement(&item.kind);
        self.colors.decrement(&item.color);
        self.event_log
            .push(PopulationEvent::Removed { item: item.clone() });
        Ok(item)
    }

    /// Change a live item's color in place. Returns the updated item.
    pub fn recolor(&mut self, id: ItemId, color: &str) -> Result<Item, PopulationError> {
        self.vocabularies.colors().check(color)?;
        let item = self
            .items
            .get_mut(&id)
            .ok_or(PopulationError::NotFound(id))?;
        let old = std::mem::replace(&mut item.color, color.to_string());
        let updated = item.clone();
        self.colors.decrement(&old);
        self.colors.increment(color);
        self.event_log.push(PopulationEvent::Recolored {
            id,
            old,
            new: color.to_string(),
        });
        Ok(updated)
    }

    /// Remove every live item. Returns them in insertion order.
    pub fn clear(&mut self) -> Vec<Item> {
        let removed: Vec<Item> = std::mem::take(&mut self.items).into_values().collect();
        self.kinds.reset();
        self.colors.reset();
        self.event_log.push(PopulationEvent::Cleared {
            count: removed.len(),
        });
        removed
    }

    /// Clear the population and switch to new vocabularies. Handles keep
    /// counting up, so no handle from before the reset is ever reissued.
    pub fn reset(&mut self, vocabularies: Vocabularies) -> Vec<Item> {
        let removed = self.clear();
        self.kinds = CountTable::zeroed(vocabularies.kinds());
        self.colors = CountTable::zeroed(vocabularies.colors());
        self.vocabularies = vocabularies;
        removed
    }

    /// Re-derive both count tables from the live items.
    pub fn refresh_counts(&mut self) {
        self.kinds.reset();
        self.colors.reset();
        for item in self.items.values() {
            self.kinds.increment(&item.kind);
            self.colors.increment(&item.color);
        }
        tracing::trace!(items = self.items.len(), "count tables refreshed");
    }

    /// Whether both count tables match a fresh tally of the live items.
    pub fn counts_consistent(&self) -> bool {
        let mut fresh = self.clone();
        fresh.refresh_counts();
        fresh.kinds == self.kinds && fresh.colors == self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vocabulary;

    fn store() -> PopulationStore {
        PopulationStore::new(Vocabularies::new(
            Vocabulary::from_labels(Attribute::Kind, &["Cube", "Sphere"]).unwrap(),
            Vocabulary::from_labels(Attribute::Color, &["Red", "Blue"]).unwrap(),
        ))
    }

    fn spec(kind: &str, color: &str) -> ItemSpec {
        ItemSpec::new(kind, color, Placement::default())
    }

    #[test]
    fn store_starts_empty() {
        let s = store();
        assert!(s.is_empty());
        assert_eq!(s.kind_counts().total(), 0);
        assert_eq!(s.color_counts().len(), 2);
    }

    #[test]
    fn add_counts_both_attributes() {
        let mut s = store();
        s.add(spec("Cube", "Red")).unwrap();
        s.add(spec("Cube", "Blue")).unwrap();
        s.add(spec("Sphere", "Red")).unwrap();
        assert_eq!(s.kind_counts().get("Cube"), 2);
        assert_eq!(s.kind_counts().get("Sphere"), 1);
        assert_eq!(s.color_counts().get("Red"), 2);
        assert!(s.counts_consistent());
    }

    #[test]
    fn add_rejects_unknown_values() {
        let mut s = store();
        let err = s.add(spec("Torus", "Red")).unwrap_err();
        assert!(matches!(
            err,
            PopulationError::VocabularyMismatch { attribute: Attribute::Kind, .. }
        ));
        let err = s.add(spec("Cube", "Mauve")).unwrap_err();
        assert!(matches!(
            err,
            PopulationError::VocabularyMismatch { attribute: Attribute::Color, .. }
        ));
        assert!(s.is_empty());
        assert!(s.events().is_empty());
    }

    #[test]
    fn remove_uncounts() {
        let mut s = store();
        let a = s.add(spec("Cube", "Red")).unwrap();
        s.add(spec("Sphere", "Blue")).unwrap();
        let removed = s.remove(a.id).unwrap();
        assert_eq!(removed, a);
        assert_eq!(s.kind_counts().get("Cube"), 0);
        assert_eq!(s.color_counts().get("Red"), 0);
        assert!(s.counts_consistent());
    }

    #[test]
    fn remove_missing_is_an_error() {
        let mut s = store();
        let a = s.add(spec("Cube", "Red")).unwrap();
        s.remove(a.id).unwrap();
        assert_eq!(s.remove(a.id).unwrap_err(), PopulationError::NotFound(a.id));
        assert_eq!(
            s.remove(ItemId(999)).unwrap_err(),
            PopulationError::NotFound(ItemId(999))
        );
    }

    #[test]
    fn recolor_moves_one_color_count() {
        let mut s = store();
        let a = s.add(spec("Cube", "Red")).unwrap();
        let updated = s.recolor(a.id, "Blue").unwrap();
        assert_eq!(updated.color, "Blue");
        assert_eq!(updated.kind, "Cube");
        assert_eq!(s.color_counts().get("Red"), 0);
        assert_eq!(s.color_counts().get("Blue"), 1);
        assert_eq!(s.kind_counts().get("Cube"), 1);
        assert!(s.counts_consistent());
    }

    #[test]
    fn recolor_checks_membership_and_vocabulary() {
        let mut s = store();
        let a = s.add(spec("Cube", "Red")).unwrap();
        assert!(matches!(
            s.recolor(a.id, "Green"),
            Err(PopulationError::VocabularyMismatch { .. })
        ));
        assert_eq!(
            s.recolor(ItemId(42), "Blue").unwrap_err(),
            PopulationError::NotFound(ItemId(42))
        );
        assert_eq!(s.get(a.id).unwrap().color, "Red");
    }

    #[test]
    fn iteration_is_insertion_order() {
        let mut s = store();
        let ids: Vec<ItemId> = (0..20)
            .map(|i| {
                let kind = if i % 2 == 0 { "Cube" } else { "Sphere" };
                s.add(spec(kind, "Red")).unwrap().id
            })
            .collect();
        let listed: Vec<ItemId> = s.items().map(|i| i.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut s = store();
        let a = s.add(spec("Cube", "Red")).unwrap();
        s.remove(a.id).unwrap();
        let b = s.add(spec("Cube", "Red")).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn clear_resets_counts() {
        let mut s = store();
        s.add(spec("Cube", "Red")).unwrap();
        s.add(spec("Sphere", "Blue")).unwrap();
        let removed = s.clear();
        assert_eq!(removed.len(), 2);
        assert!(s.is_empty());
        assert_eq!(s.kind_counts().total(), 0);
        assert_eq!(s.color_counts().total(), 0);
    }

    #[test]
    fn reset_swaps_vocabularies_and_keeps_handles_fresh() {
        let mut s = store();
        let a = s.add(spec("Cube", "Red")).unwrap();
        let removed = s.reset(Vocabularies::new(
            Vocabulary::from_labels(Attribute::Kind, &["Cone"]).unwrap(),
            Vocabulary::from_labels(Attribute::Color, &["Green"]).unwrap(),
        ));
        assert_eq!(removed, [a.clone()]);
        assert_eq!(s.kind_counts().len(), 1);
        assert!(s.add(spec("Cube", "Red")).is_err());
        let b = s.add(spec("Cone", "Green")).unwrap();
        assert!(b.id > a.id);
        assert_eq!(s.kind_counts().get("Cone"), 1);
    }

    #[test]
    fn events_are_recorded() {
        let mut s = store();
        let a = s.add(spec("Cube", "Red")).unwrap();
        s.recolor(a.id, "Blue").unwrap();
        s.remove(a.id).unwrap();
        assert_eq!(s.events().len(), 3);
        assert!(matches!(
            &s.events()[1],
            PopulationEvent::Recolored { old, new, .. } if old == "Red" && new == "Blue"
        ));
    }

    #[test]
    fn drain_events_clears_log() {
        let mut s = store();
        s.add(spec("Cube", "Red")).unwrap();
        let events = s.drain_events();
        assert_eq!(events.len(), 1);
        assert!(s.events().is_empty());
    }

    #[test]
    fn refresh_matches_incremental_counts() {
        let mut s = store();
        for i in 0..12 {
            let color = if i % 3 == 0 { "Red" } else { "Blue" };
            s.add(spec("Sphere", color)).unwrap();
        }
        let before = (s.kind_counts().clone(), s.color_counts().clone());
        s.refresh_counts();
        assert_eq!(before.0, *s.kind_counts());
        assert_eq!(before.1, *s.color_counts());
    }
}

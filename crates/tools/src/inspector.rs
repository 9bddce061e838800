use serde::Serialize;
use shapes_balance::BalanceAnalyzer;
use shapes_common::{Attribute, ItemId};
use shapes_kernel::{CountTable, PopulationStore, Vocabulary};

/// Read-only queries against the population for debugging and display.
pub struct PopulationInspector;

impl PopulationInspector {
    /// Counts per category, by label, plus the current skews.
    pub fn summary(store: &PopulationStore) -> PopulationSummary {
        let vocab = store.vocabularies();
        let analyzer = BalanceAnalyzer::new(store, 0);
        PopulationSummary {
            items: store.len(),
            kinds: labelled(vocab.kinds(), store.counts(Attribute::Kind)),
            colors: labelled(vocab.colors(), store.counts(Attribute::Color)),
            kind_skew: analyzer.kind_skew(),
            color_skew: analyzer.color_skew(),
            pending_events: store.events().len(),
        }
    }

    /// Display info for one item, labels resolved through the vocabularies.
    pub fn inspect_item(store: &PopulationStore, id: ItemId) -> Option<ItemInfo> {
        let vocab = store.vocabularies();
        store.get(id).map(|item| {
            let l = item.placement.location;
            ItemInfo {
                id,
                kind: label_or_key(vocab.kinds(), &item.kind),
                color: label_or_key(vocab.colors(), &item.color),
                size: item.size,
                location: [l.x, l.y, l.z],
            }
        })
    }

    /// Info lines for every live item, in insertion order.
    pub fn list_items(store: &PopulationStore) -> Vec<ItemInfo> {
        store
            .items()
            .filter_map(|item| Self::inspect_item(store, item.id))
            .collect()
    }
}

fn labelled(vocabulary: &Vocabulary, table: &CountTable) -> Vec<(String, usize)> {
    table
        .iter()
        .map(|(key, n)| (label_or_key(vocabulary, key), n))
        .collect()
}

fn label_or_key(vocabulary: &Vocabulary, key: &str) -> String {
    vocabulary.label(key).unwrap_or(key).to_string()
}

/// Summary of the population for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationSummary {
    pub items: usize,
    pub kinds: Vec<(String, usize)>,
    pub colors: Vec<(String, usize)>,
    pub kind_skew: usize,
    pub color_skew: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for PopulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |counts: &[(String, usize)]| {
            counts
                .iter()
                .map(|(label, n)| format!("{label}={n}"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(
            f,
            "Population: items={} kinds[{}] skew={} colors[{}] skew={}",
            self.items,
            join(&self.kinds),
            self.kind_skew,
            join(&self.colors),
            self.color_skew,
        )
    }
}

/// Tooltip-style info about a single item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemInfo {
    pub id: ItemId,
    pub kind: String,
    pub color: String,
    pub size: f32,
    pub location: [f32; 3],
}

impl std::fmt::Display for ItemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Type: {} | Color: {} | Size: {:.2} @ ({:.1}, {:.1}, {:.1})",
            self.id,
            self.kind,
            self.color,
            self.size,
            self.location[0],
            self.location[1],
            self.location[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use shapes_common::Placement;
    use shapes_kernel::{Category, ItemSpec, Vocabularies};

    fn store() -> PopulationStore {
        PopulationStore::new(Vocabularies::new(
            Vocabulary::new(
                Attribute::Kind,
                vec![Category::new("cube", "Cube"), Category::new("sphere", "Sphere")],
            )
            .unwrap(),
            Vocabulary::new(
                Attribute::Color,
                vec![Category::new("red", "Red"), Category::new("blue", "Blue")],
            )
            .unwrap(),
        ))
    }

    #[test]
    fn summary_empty_population() {
        let s = PopulationInspector::summary(&store());
        assert_eq!(s.items, 0);
        assert_eq!(s.kind_skew, 0);
        assert_eq!(s.kinds, [("Cube".to_string(), 0), ("Sphere".to_string(), 0)]);
    }

    #[test]
    fn summary_uses_labels_and_skew() {
        let mut st = store();
        st.add(ItemSpec::new("cube", "red", Placement::default())).unwrap();
        st.add(ItemSpec::new("cube", "blue", Placement::default())).unwrap();
        st.add(ItemSpec::new("cube", "red", Placement::default())).unwrap();

        let s = PopulationInspector::summary(&st);
        assert_eq!(s.items, 3);
        assert_eq!(s.kind_skew, 3);
        assert_eq!(s.color_skew, 1);
        assert_eq!(s.pending_events, 3);
        let text = s.to_string();
        assert!(text.contains("Cube=3"));
        assert!(text.contains("Red=2"));
    }

    #[test]
    fn inspect_item_found() {
        let mut st = store();
        let item = st
            .add(ItemSpec::new(
                "sphere",
                "blue",
                Placement::new(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(2.0)),
            ))
            .unwrap();
        let info = PopulationInspector::inspect_item(&st, item.id).unwrap();
        assert_eq!(info.kind, "Sphere");
        assert_eq!(info.color, "Blue");
        assert_eq!(info.location, [1.0, 2.0, 3.0]);
        assert!(info.to_string().contains("Type: Sphere | Color: Blue | Size: 2.00"));
    }

    #[test]
    fn inspect_item_not_found() {
        assert!(PopulationInspector::inspect_item(&store(), ItemId(9)).is_none());
    }

    #[test]
    fn list_items_in_insertion_order() {
        let mut st = store();
        let a = st.add(ItemSpec::new("cube", "red", Placement::default())).unwrap();
        let b = st.add(ItemSpec::new("sphere", "red", Placement::default())).unwrap();
        let ids: Vec<ItemId> = PopulationInspector::list_items(&st).iter().map(|i| i.id).collect();
        assert_eq!(ids, [a.id, b.id]);
    }
}

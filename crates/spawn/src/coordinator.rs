use shapes_balance::{RebalanceEngine, RebalanceResult};
use shapes_common::ItemId;
use shapes_kernel::{
    Item, ItemSpec, PopulationError, PopulationEvent, PopulationStore, Vocabularies, VisualPort,
};

use crate::{BoxPlacement, ConfigError, PlacementSource, SpawnConfig};

/// Owns the population and routes external signals into it.
///
/// Removal events are serialized by `&mut self`: each one is fully
/// processed before the next can start. Share a coordinator across threads
/// only behind a `Mutex`.
pub struct SpawnCoordinator<P, V> {
    store: PopulationStore,
    engine: RebalanceEngine,
    placement: P,
    visuals: V,
    count_per_kind: usize,
}

impl<V: VisualPort> SpawnCoordinator<BoxPlacement, V> {
    /// Coordinator with box placement seeded from the config, already holding
    /// `count_per_kind` items of every configured kind.
    pub fn from_config(config: &SpawnConfig, visuals: V) -> Result<Self, ConfigError> {
        config.validate()?;
        let vocabularies = config.vocabularies()?;
        let mut coordinator = Self::new(
            vocabularies.clone(),
            config.tolerance,
            BoxPlacement::new(config.region, config.seed),
            visuals,
        );
        coordinator.initialize_population(vocabularies, config.count_per_kind)?;
        Ok(coordinator)
    }
}

impl<P: PlacementSource, V: VisualPort> SpawnCoordinator<P, V> {
    pub fn new(vocabularies: Vocabularies, tolerance: u32, placement: P, visuals: V) -> Self {
        Self {
            store: PopulationStore::new(vocabularies),
            engine: RebalanceEngine::new(tolerance),
            placement,
            visuals,
            count_per_kind: 0,
        }
    }

    pub fn store(&self) -> &PopulationStore {
        &self.store
    }

    pub fn engine(&self) -> &RebalanceEngine {
        &self.engine
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn visuals_mut(&mut self) -> &mut V {
        &mut self.visuals
    }

    /// Take the population events recorded since the last drain. Long-running
    /// drivers call this after each signal to keep the log bounded.
    pub fn drain_events(&mut self) -> Vec<PopulationEvent> {
        self.store.drain_events()
    }

    /// Per-kind count used by the most recent initialization.
    pub fn count_per_kind(&self) -> usize {
        self.count_per_kind
    }

    /// Replace the population with `count_per_kind` items of every kind.
    ///
    /// Colors cycle through the color vocabulary with a running index shared
    /// across kinds, so the initial color split is as even as possible.
    pub fn initialize_population(
        &mut self,
        vocabularies: Vocabularies,
        count_per_kind: usize,
    ) -> Result<Vec<Item>, PopulationError> {
        let _span = tracing::info_span!("initialize_population", count_per_kind).entered();

        for old in self.store.reset(vocabularies) {
            self.visuals.destroy_visual(old.id);
        }
        self.count_per_kind = count_per_kind;

        let vocab = self.store.vocabularies();
        let kinds: Vec<String> = vocab.kinds().keys().map(String::from).collect();
        let colors: Vec<String> = vocab.colors().keys().map(String::from).collect();

        let mut spawned = Vec::with_capacity(kinds.len() * count_per_kind);
        let mut running = 0usize;
        for kind in &kinds {
            for _ in 0..count_per_kind {
                let color = &colors[running % colors.len()];
                running += 1;
                let placement = self.placement.next_placement();
                let item = self
                    .store
                    .add(ItemSpec::new(kind.as_str(), color.as_str(), placement))?;
                self.visuals.create_visual(&item);
                spawned.push(item);
            }
        }

        tracing::info!(items = spawned.len(), kinds = kinds.len(), "population initialized");
        Ok(spawned)
    }

    /// Re-initialize with `n` items per kind over the current vocabularies.
    pub fn on_population_target_received(
        &mut self,
        n: usize,
    ) -> Result<Vec<Item>, PopulationError> {
        tracing::debug!(n, "population target received");
        let vocabularies = self.store.vocabularies().clone();
        self.initialize_population(vocabularies, n)
    }

    /// External notification that `id` was removed. Returns what the
    /// rebalance did.
    pub fn on_item_removed(&mut self, id: ItemId) -> Result<RebalanceResult, PopulationError> {
        let result = self.engine.rebalance(&mut self.store, id, &mut self.visuals);
        match &result {
            Ok(r) => tracing::info!(
                removed = %r.removed.id,
                action = ?r.action,
                corrected = r.corrected(),
                remaining = self.store.len(),
                "item removed"
            ),
            Err(err) => tracing::warn!(item = %id, %err, "removal rejected"),
        }
        result
    }
}

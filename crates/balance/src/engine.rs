use serde::Serialize;
use shapes_common::ItemId;
use shapes_kernel::{Item, ItemSpec, PopulationError, PopulationStore, VisualPort};

use crate::analyzer::{BalanceAnalyzer, Direction};

/// Which corrective branch a removal was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RebalanceAction {
    /// Both distributions are within tolerance.
    NoAction,
    /// Only colors are skewed: one item is recolored in place.
    ColorOnly,
    /// Only kinds are skewed: one item is replaced by a different kind.
    KindOnly,
    /// Both are skewed: one item is replaced by a different kind and color.
    Both,
}

/// What a removal did to the population.
///
/// For `ColorOnly`, `deleted` and `added` are the same item before and after
/// its recolor. Both are `None` when no correction was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceResult {
    pub removed: Item,
    pub action: RebalanceAction,
    pub deleted: Option<Item>,
    pub added: Option<Item>,
}

impl RebalanceResult {
    /// Whether a corrective mutation was committed.
    pub fn corrected(&self) -> bool {
        self.added.is_some()
    }
}

/// The single mutation chosen for one removal.
#[derive(Debug)]
enum Correction {
    Recolor { id: ItemId, color: String },
    Replace { target: ItemId, kind: String, color: String },
}

/// Decides and applies at most one corrective action per removal.
#[derive(Debug, Clone, Copy)]
pub struct RebalanceEngine {
    tolerance: u32,
}

impl RebalanceEngine {
    pub fn new(tolerance: u32) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    /// Remove `removed` from the store and nudge the distributions back
    /// toward balance.
    ///
    /// Fails without touching the store if the population is empty or
    /// `removed` is not live.
    pub fn rebalance(
        &self,
        store: &mut PopulationStore,
        removed: ItemId,
        visuals: &mut dyn VisualPort,
    ) -> Result<RebalanceResult, PopulationError> {
        let _span = tracing::info_span!("rebalance", item = %removed).entered();

        if store.is_empty() {
            return Err(PopulationError::EmptyPopulation);
        }

        let removed = store.remove(removed)?;
        store.refresh_counts();

        let (action, correction) = self.classify(store, &removed)?;
        tracing::debug!(?action, kind = %removed.kind, color = %removed.color, "removal classified");

        let (deleted, added) = match correction {
            None => (None, None),
            Some(correction) => match apply(store, correction, visuals) {
                Ok(pair) => pair,
                Err(err) => {
                    tracing::error!(%err, "correction aborted, keeping post-removal state");
                    debug_assert!(false, "correction aborted: {err}");
                    (None, None)
                }
            },
        };
        store.refresh_counts();

        Ok(RebalanceResult {
            removed,
            action,
            deleted,
            added,
        })
    }

    fn classify(
        &self,
        store: &PopulationStore,
        removed: &Item,
    ) -> Result<(RebalanceAction, Option<Correction>), PopulationError> {
        let analyzer = BalanceAnalyzer::new(store, self.tolerance);
        let over_kinds = analyzer.overrepresented_kinds(&removed.kind);
        let over_colors = analyzer.overrepresented_colors(&removed.color);
        tracing::trace!(?over_kinds, ?over_colors, "overrepresented categories");

        let action = match (over_kinds.is_empty(), over_colors.is_empty()) {
            (true, true) => return Ok((RebalanceAction::NoAction, None)),
            (true, false) => RebalanceAction::ColorOnly,
            (false, true) => RebalanceAction::KindOnly,
            (false, false) => RebalanceAction::Both,
        };

        let correction = match action {
            RebalanceAction::ColorOnly => {
                let target_kind = analyzer.extremal_kind(Direction::Max)?;
                let min_color = analyzer.extremal_color(Direction::Min)?;
                store
                    .items()
                    .find(|i| i.kind == target_kind && over_colors.contains(&i.color.as_str()))
                    .map(|i| Correction::Recolor {
                        id: i.id,
                        color: min_color.to_string(),
                    })
            }
            RebalanceAction::KindOnly => {
                let max_color = analyzer.extremal_color(Direction::Max)?;
                let min_kind = analyzer.extremal_kind(Direction::Min)?;
                store
                    .items()
                    .find(|i| i.color == max_color && over_kinds.contains(&i.kind.as_str()))
                    .map(|i| Correction::Replace {
                        target: i.id,
                        kind: min_kind.to_string(),
                        color: i.color.clone(),
                    })
            }
            RebalanceAction::Both => {
                let max_kind = analyzer.extremal_kind(Direction::Max)?;
                let max_color = analyzer.extremal_color(Direction::Max)?;
                let min_kind = analyzer.extremal_kind(Direction::Min)?;
                let min_color = analyzer.extremal_color(Direction::Min)?;
                store
                    .items()
                    .find(|i| i.kind == max_kind && i.color == max_color)
                    .map(|i| Correction::Replace {
                        target: i.id,
                        kind: min_kind.to_string(),
                        color: min_color.to_string(),
                    })
            }
            RebalanceAction::NoAction => None,
        };

        if correction.is_none() {
            tracing::warn!(?action, "no live item matches the correction, skipping");
        }
        Ok((action, correction))
    }
}

/// Commit one correction. Values are validated before anything is removed,
/// so a failure leaves the store untouched.
fn apply(
    store: &mut PopulationStore,
    correction: Correction,
    visuals: &mut dyn VisualPort,
) -> Result<(Option<Item>, Option<Item>), PopulationError> {
    match correction {
        Correction::Recolor { id, color } => {
            let before = store
                .get(id)
                .cloned()
                .ok_or(PopulationError::NotFound(id))?;
            let after = store.recolor(id, &color)?;
            visuals.set_visual_color(id, &color);
            tracing::debug!(item = %id, from = %before.color, to = %color, "recolored");
            Ok((Some(before), Some(after)))
        }
        Correction::Replace {
            target,
            kind,
            color,
        } => {
            store.vocabularies().kinds().check(&kind)?;
            store.vocabularies().colors().check(&color)?;
            let deleted = store.remove(target)?;
            let added = store.add(ItemSpec {
                kind,
                color,
                size: deleted.size,
                placement: deleted.placement,
            })?;
            visuals.destroy_visual(deleted.id);
            visuals.create_visual(&added);
            tracing::debug!(
                deleted = %deleted.id,
                added = %added.id,
                kind = %added.kind,
                color = %added.color,
                "replaced"
            );
            Ok((Some(deleted), Some(added)))
        }
    }
}

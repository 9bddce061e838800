use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use shapes_common::Placement;

use crate::{PLACEMENT_STREAM, SpawnRegion, seeded_rng};

/// Supplier of spawn placements. The population treats placements as opaque.
pub trait PlacementSource {
    fn next_placement(&mut self) -> Placement;
}

/// Uniform placement inside a box with a uniform scale, drawn from the
/// placement stream of a seeded generator.
#[derive(Debug, Clone)]
pub struct BoxPlacement {
    region: SpawnRegion,
    rng: ChaCha8Rng,
}

impl BoxPlacement {
    /// `region` must be validated: min corner at or below max, scale range ordered.
    pub fn new(region: SpawnRegion, seed: u64) -> Self {
        Self {
            region,
            rng: seeded_rng(seed, PLACEMENT_STREAM),
        }
    }

    pub fn region(&self) -> &SpawnRegion {
        &self.region
    }
}

impl PlacementSource for BoxPlacement {
    fn next_placement(&mut self) -> Placement {
        let SpawnRegion {
            min,
            max,
            scale_min,
            scale_max,
        } = self.region;
        let location = Vec3::new(
            self.rng.gen_range(min.x..=max.x),
            self.rng.gen_range(min.y..=max.y),
            self.rng.gen_range(min.z..=max.z),
        );
        let scale = Vec3::splat(self.rng.gen_range(scale_min..=scale_max));
        Placement::new(location, scale)
    }
}

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{TARGET_STREAM, TargetRange, seeded_rng};

/// Draws per-kind population targets from a configured inclusive range.
#[derive(Debug, Clone)]
pub struct TargetRoller {
    range: TargetRange,
    rng: ChaCha8Rng,
}

impl TargetRoller {
    /// `range` must be validated (`min <= max`).
    pub fn new(range: TargetRange, seed: u64) -> Self {
        Self {
            range,
            rng: seeded_rng(seed, TARGET_STREAM),
        }
    }

    pub fn range(&self) -> TargetRange {
        self.range
    }

    /// Next target, uniform over `[min, max]`.
    pub fn roll(&mut self) -> usize {
        let n = self.rng.gen_range(self.range.min..=self.range.max);
        tracing::debug!(n, min = self.range.min, max = self.range.max, "population target rolled");
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_stay_in_range_and_hit_both_ends() {
        let mut roller = TargetRoller::new(TargetRange { min: 4, max: 7 }, 5);
        let draws: Vec<usize> = (0..500).map(|_| roller.roll()).collect();
        assert!(draws.iter().all(|n| (4..=7).contains(n)));
        assert!(draws.contains(&4));
        assert!(draws.contains(&7));
    }

    #[test]
    fn degenerate_range_is_constant() {
        let mut roller = TargetRoller::new(TargetRange { min: 3, max: 3 }, 0);
        assert_eq!(roller.roll(), 3);
        assert_eq!(roller.roll(), 3);
    }

    #[test]
    fn same_seed_same_rolls() {
        let range = TargetRange { min: 1, max: 100 };
        let mut a = TargetRoller::new(range, 8);
        let mut b = TargetRoller::new(range, 8);
        for _ in 0..20 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}

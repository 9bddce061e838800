//! Seeded generators. One config seed feeds several independent ChaCha
//! streams so that no two consumers share draws.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const PLACEMENT_STREAM: u64 = 1;
pub const TARGET_STREAM: u64 = 2;
/// Stream for picking which item a driver removes next.
pub const REMOVAL_STREAM: u64 = 3;

pub fn seeded_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

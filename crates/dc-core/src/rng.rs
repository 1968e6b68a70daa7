//! Random number generation for the session
//!
//! Uses a seeded ChaCha RNG for reproducibility: every generator roll in the
//! game draws from one `GameRng` owned by the session, so a fixed seed
//! replays an identical run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - only the original seed survives a
/// round-trip, and a deserialized RNG restarts from it.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `0..n`. Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in `lo..hi`. Returns `lo` if the range is empty.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Uniform float in `lo..hi`. Returns `lo` if the range is empty.
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Returns true with probability percent/100
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rn2(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

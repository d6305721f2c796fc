//! Minimal perfect hashing over fixed integer key sets.
//!
//! A minimal perfect hash function maps a known, fixed set of `n` keys
//! bijectively onto the slots `0..n`: no collisions, no wasted slots. This
//! crate builds one with a multi-level bit-vector scheme in the style of
//! BBHash: each level hashes the still-unplaced keys into a `gamma`-sized
//! table, keeps the keys that land alone in their bucket, and defers the
//! rest to the next level with a rotated bucket assignment. Sampled prefix
//! popcounts over each level's occupancy bits turn a key's bit position
//! into its dense slot in constant time.
//!
//! The function only answers meaningfully for keys it was built over;
//! other keys resolve to [`None`] or to an arbitrary slot. [`PerfectMap`]
//! stores the construction keys alongside a value array and uses them to
//! reject such strangers.
//!
//! ```
//! use mph::PerfectHash;
//!
//! let keys = [3u64, 11, 942, 7, 29];
//! let phf = PerfectHash::new(&keys)?;
//!
//! let mut slots: Vec<usize> = keys.iter().filter_map(|&k| phf.index_of(k)).collect();
//! slots.sort_unstable();
//! assert_eq!(slots, vec![0, 1, 2, 3, 4]);
//! # Ok::<(), mph::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod bits;
mod err;
mod func;
mod level;
mod map;

pub use err::Error;
pub use func::PerfectHash;
pub use map::{Key, PerfectMap};

/// Default load factor: table bits per remaining key at each level.
///
/// Larger values spend memory to lower the collision rate, which means
/// fewer levels and faster queries; smaller values pack tighter and
/// resolve more keys in later levels.
pub const DEFAULT_GAMMA: f64 = 2.0;

/// Hard upper bound on construction levels.
///
/// Each level rotates the upper 32-bit hash half one step further, so
/// after 32 levels the bucket assignments repeat exactly and further
/// levels cannot separate keys that have collided so far.
pub const MAX_LEVELS: usize = 32;

/// Builder for [`PerfectHash`] and [`PerfectMap`] with custom settings
#[derive(Debug, Clone, PartialEq)]
pub struct Builder {
    /// Load factor, table bits per remaining key
    gamma: f64,
    /// Construction fails after this many levels
    max_levels: usize,
}

impl Builder {
    /// Create a [`Builder`] with default settings.
    ///
    /// Immediately calling [`Self::build()`] is equivalent to
    /// [`PerfectHash::new()`].
    pub fn new() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            max_levels: MAX_LEVELS,
        }
    }

    /// Select a load factor. Must be finite and at least 1.0.
    pub fn gamma(&mut self, gamma: f64) -> &mut Self {
        self.gamma = gamma;
        self
    }

    /// Select a level limit. Must be between 1 and [`MAX_LEVELS`].
    pub fn max_levels(&mut self, max_levels: usize) -> &mut Self {
        self.max_levels = max_levels;
        self
    }

    /// Build a [`PerfectHash`] over `keys` with the selected options.
    ///
    /// Keys must be distinct: a duplicated key collides with its copies
    /// at every level and construction reports
    /// [`Error::LevelsExhausted`] once the level limit is hit.
    pub fn build(&self, keys: &[u64]) -> Result<PerfectHash, Error> {
        if !self.gamma.is_finite() || self.gamma < 1.0 {
            return Err(Error::LoadFactor(self.gamma));
        }
        if self.max_levels == 0 || self.max_levels > MAX_LEVELS {
            return Err(Error::LevelLimit(self.max_levels));
        }
        PerfectHash::build(keys, self.gamma, self.max_levels)
    }

    /// Build a [`PerfectMap`] over distinct `keys` with the selected
    /// options, every value initialized to `V::default()`.
    pub fn build_map<K: Key, V: Clone + Default>(
        &self,
        keys: &[K],
    ) -> Result<PerfectMap<K, V>, Error> {
        PerfectMap::with_builder(self, keys)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

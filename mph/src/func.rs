//! The built hash function: ordered levels and the query path

use crate::bits::{BitVec, RankedBits};
use crate::err::Error;
use crate::{level, MAX_LEVELS};
use arrayvec::ArrayVec;

/// A minimal perfect hash function over a fixed set of 64-bit keys.
///
/// Maps every key of the construction set to a unique slot in
/// `0..len()`, with no gaps. Immutable once built. Keys outside the
/// construction set resolve to [`None`] or to an arbitrary in-range
/// slot; callers that must distinguish members from strangers need an
/// auxiliary check, such as the stored keys in [`crate::PerfectMap`].
#[derive(Clone, Debug)]
pub struct PerfectHash {
    /// Frozen levels in construction order
    levels: ArrayVec<RankedBits, MAX_LEVELS>,
    /// Number of keys the function was built over
    len: usize,
}

impl PerfectHash {
    /// Build over `keys` with default options.
    ///
    /// Equivalent to [`crate::Builder::new().build(keys)`](crate::Builder::build).
    /// Keys must be distinct; duplicates collide at every level and fail
    /// with [`Error::LevelsExhausted`].
    pub fn new(keys: &[u64]) -> Result<Self, Error> {
        crate::Builder::new().build(keys)
    }

    /// Build over `keys`, options validated by [`crate::Builder`].
    pub(crate) fn build(keys: &[u64], gamma: f64, max_levels: usize) -> Result<Self, Error> {
        let mut occupancy: ArrayVec<BitVec, MAX_LEVELS> = ArrayVec::new();

        let mut working = keys.to_vec();
        while !working.is_empty() {
            if occupancy.len() == max_levels {
                return Err(Error::LevelsExhausted(max_levels));
            }
            let (placed, deferred) = level::build_level(&working, occupancy.len() as u32, gamma);
            occupancy.push(placed);
            working = deferred;
        }

        // Freeze the levels, threading the running popcount through so
        // each level's ranks continue where the previous level stopped.
        let mut levels = ArrayVec::new();
        let mut pop = 0;
        for bits in occupancy {
            let (ranked, next) = RankedBits::new(bits, pop);
            pop = next;
            levels.push(ranked);
        }

        Ok(Self {
            levels,
            len: keys.len(),
        })
    }

    /// Slot for `key`, or [`None`] if no level holds its bit.
    ///
    /// Levels are tested in construction order; the first set bit wins
    /// and its global rank is the slot. For construction keys the answer
    /// is a unique value in `0..len()` and is stable across calls.
    pub fn index_of(&self, key: u64) -> Option<usize> {
        let hash = level::mix64(key);
        for (i, lvl) in self.levels.iter().enumerate() {
            let idx = level::bucket_of(hash, i as u32, lvl.bit_len());
            if lvl.get(idx) {
                return Some(lvl.rank(idx));
            }
        }
        None
    }

    /// Number of keys the function was built over.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the function was built over an empty key set.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels the construction needed.
    pub fn levels(&self) -> usize {
        self.levels.len()
    }

    /// Heap bytes held by the level bit vectors and rank samples.
    pub fn size(&self) -> usize {
        self.levels.iter().map(RankedBits::size).sum()
    }
}

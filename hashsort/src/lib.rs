//! Counting sort for integer slices through a minimal perfect hash.
//!
//! [`hash_sort`] replaces comparisons with counting: it builds an
//! [`mph::PerfectMap`] over the distinct input values, counts every
//! occurrence into the map's slots in one pass, then walks the value range
//! `min..=max` in order and re-emits each present value its counted number
//! of times. That is O(n) hash work plus O(range) scanning instead of
//! O(n log n) comparisons — a good trade when the value range is not much
//! wider than the input is long.
//!
//! ```
//! let sorted = hashsort::hash_sort(&[2, 1, -1, 0])?;
//! assert_eq!(sorted, vec![-1, 0, 1, 2]);
//! # Ok::<(), hashsort::SortError>(())
//! ```

use mph::PerfectMap;
use num_traits::{AsPrimitive, PrimInt};
use std::collections::HashSet;
use std::hash::Hash;

/// Integer types sortable by [`hash_sort`]: any ordered fixed-width
/// integer, signed or unsigned.
pub trait SortKey: PrimInt + AsPrimitive<u64> + Hash {}

impl<T: PrimInt + AsPrimitive<u64> + Hash> SortKey for T {}

/// Returns a sorted copy of `keys`, ascending.
///
/// The hash is built over the distinct values only, with per-value
/// occurrence counters in the map; heavily duplicated inputs therefore
/// cost no extra construction levels. Construction failure is
/// all-but-impossible for in-range inputs but is surfaced rather than
/// looped on.
pub fn hash_sort<K: SortKey>(keys: &[K]) -> Result<Vec<K>, SortError> {
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let distinct: Vec<K> = keys.iter().copied().collect::<HashSet<K>>().into_iter().collect();
    let mut counts: PerfectMap<K, usize> = PerfectMap::new(&distinct)?;

    // Count occurrences and find the value range. Min and max start from
    // the first element; seeding them from zero would corrupt the range
    // for all-negative or all-positive inputs.
    let mut min = keys[0];
    let mut max = keys[0];
    for &key in keys {
        *counts
            .get_mut(key)
            .expect("every input value is a construction key") += 1;
        if key < min {
            min = key;
        } else if key > max {
            max = key;
        }
    }

    // Walk the range in order, emitting each value its counted number of
    // times. The verified lookup skips values absent from the input, even
    // when the hash function aliases them onto an occupied slot.
    let mut sorted = Vec::with_capacity(keys.len());
    let mut value = min;
    loop {
        if let Some(&n) = counts.get(value) {
            sorted.resize(sorted.len() + n, value);
        }
        if value == max {
            break;
        }
        value = value + K::one();
    }

    Ok(sorted)
}

/// [`hash_sort`] with an absent/empty distinction: no input slice yields
/// no output slice, while an empty slice yields an empty one.
pub fn hash_sort_opt<K: SortKey>(keys: Option<&[K]>) -> Result<Option<Vec<K>>, SortError> {
    match keys {
        None => Ok(None),
        Some(keys) => hash_sort(keys).map(Some),
    }
}

/// Failure to sort, carrying the hash construction error
#[derive(Debug)]
pub enum SortError {
    /// The perfect hash over the distinct values could not be built
    Build(mph::Error),
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SortError::Build(_) => write!(f, "failed to build the counting hash"),
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SortError::Build(err) => Some(err),
        }
    }
}

impl From<mph::Error> for SortError {
    fn from(err: mph::Error) -> Self {
        SortError::Build(err)
    }
}

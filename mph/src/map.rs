//! A dense map keyed by a minimal perfect hash

use crate::err::Error;
use crate::func::PerfectHash;
use crate::Builder;
use num_traits::AsPrimitive;

/// Integer types usable as [`PerfectMap`] keys.
///
/// Any fixed-width integer qualifies. The `AsPrimitive<u64>` bound is the
/// key→word conversion: `as` semantics, so signed keys sign-extend and two
/// distinct key values always map to distinct words.
pub trait Key: Copy + Eq + AsPrimitive<u64> {}

impl<T: Copy + Eq + AsPrimitive<u64>> Key for T {}

/// A fixed-key map with one densely packed slot per key.
///
/// Pairs a [`PerfectHash`] over the construction keys with a value array
/// of exactly `len()` slots. The keys themselves are also stored, slot by
/// slot, so lookups can reject keys outside the construction set — the
/// hash function alone would resolve such keys to an arbitrary slot.
///
/// The key set is fixed at construction; only the values are mutable.
#[derive(Clone, Debug)]
pub struct PerfectMap<K, V> {
    /// Key→slot resolution
    func: PerfectHash,
    /// The construction key stored in each slot, for membership checks
    keys: Box<[K]>,
    /// One value per slot
    vals: Box<[V]>,
}

impl<K: Key, V: Clone + Default> PerfectMap<K, V> {
    /// Build a map over distinct `keys` with default options, every value
    /// initialized to `V::default()`.
    pub fn new(keys: &[K]) -> Result<Self, Error> {
        Self::with_builder(&Builder::new(), keys)
    }

    /// Build a map over distinct `keys` with the given options.
    pub fn with_builder(builder: &Builder, keys: &[K]) -> Result<Self, Error> {
        let words: Vec<u64> = keys.iter().map(|k| k.as_()).collect();
        let func = builder.build(&words)?;

        // Construction succeeded, so the function is a bijection from the
        // keys onto 0..len and this overwrites every placeholder exactly once.
        let mut slot_keys = keys.to_vec();
        for &key in keys {
            let slot = func
                .index_of(key.as_())
                .expect("construction keys always resolve to a slot");
            slot_keys[slot] = key;
        }

        Ok(Self {
            func,
            keys: slot_keys.into_boxed_slice(),
            vals: vec![V::default(); keys.len()].into_boxed_slice(),
        })
    }
}

impl<K: Key, V> PerfectMap<K, V> {
    /// Raw slot resolution through the hash function, without the
    /// membership check. For keys outside the construction set this may
    /// be [`None`] or an arbitrary in-range slot.
    pub fn index_of(&self, key: K) -> Option<usize> {
        self.func.index_of(key.as_())
    }

    /// The value for `key`, or [`None`] if `key` was not a construction key.
    pub fn get(&self, key: K) -> Option<&V> {
        let slot = self.func.index_of(key.as_())?;
        (self.keys[slot] == key).then(|| &self.vals[slot])
    }

    /// Mutable access to the value for `key`.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let slot = self.func.index_of(key.as_())?;
        (self.keys[slot] == key).then(|| &mut self.vals[slot])
    }

    /// The value stored at `slot`.
    ///
    /// `slot` must come from [`Self::index_of`] on this map.
    pub fn value(&self, slot: usize) -> &V {
        &self.vals[slot]
    }

    /// Replace the value stored at `slot`.
    ///
    /// `slot` must come from [`Self::index_of`] on this map.
    pub fn set_value(&mut self, slot: usize, value: V) {
        self.vals[slot] = value;
    }

    /// Number of slots, equal to the number of construction keys.
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    /// Whether the map was built over an empty key set.
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }
}

//! Building a single level of the hash function
//!
//! A level hashes the current working key set into a table of
//! `gamma * keys` bits. Keys that land alone in their bucket are placed;
//! keys that share a bucket are deferred to the next level, which retries
//! them with a rotated bucket assignment against a freshly sized table.

use crate::bits::BitVec;

/// 64-bit xorshift* mixer.
///
/// From Vigna, "An experimental exploration of Marsaglia's xorshift
/// generators, scrambled" (<https://vigna.di.unimi.it/ftp/papers/xorshift.pdf>).
#[inline]
pub(crate) fn mix64(mut x: u64) -> u64 {
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

/// Bucket index for a mixed key at the given level.
///
/// The mixed hash splits into 32-bit halves `(h1, h2)`; each level XORs
/// `h1` with a further-rotated `h2`, so one 64-bit hash yields 32 distinct
/// bucket assignments. `level` must stay below [`crate::MAX_LEVELS`] or
/// the rotation wraps and assignments repeat.
#[inline]
pub(crate) fn bucket_of(hash: u64, level: u32, table_bits: usize) -> usize {
    let h1 = hash as u32;
    let h2 = (hash >> 32) as u32;
    (h1 ^ h2.rotate_left(level)) as usize % table_bits
}

/// Table size in bits for a working set of `keys` keys: `ceil(gamma * keys)`
/// rounded up to a 64-bit boundary, never below one word.
fn table_size(keys: usize, gamma: f64) -> usize {
    let want = (gamma * keys as f64).ceil() as usize;
    ((want + 63) & !63).max(64)
}

/// Build one level over `keys`, already mixed to 64-bit words.
///
/// Two passes. The first marks scratch `occupied` and `collide` vectors:
/// a bucket seen once is occupied, a bucket seen again is a collision.
/// The second emits the final occupancy vector holding only the
/// collision-free keys, and collects the colliding keys for the next
/// level. The scratch vectors are dropped on return.
pub(crate) fn build_level(keys: &[u64], level: u32, gamma: f64) -> (BitVec, Vec<u64>) {
    let table_bits = table_size(keys.len(), gamma);

    let mut occupied = BitVec::new(table_bits);
    let mut collide = BitVec::new(table_bits);
    for &key in keys {
        let idx = bucket_of(mix64(key), level, table_bits);
        if collide.get(idx) {
            continue;
        }
        if occupied.get(idx) {
            collide.set(idx);
            continue;
        }
        occupied.set(idx);
    }

    let mut placed = BitVec::new(table_bits);
    let mut deferred = Vec::new();
    for &key in keys {
        let idx = bucket_of(mix64(key), level, table_bits);
        if collide.get(idx) {
            deferred.push(key);
        } else {
            placed.set(idx);
        }
    }

    (placed, deferred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_size_is_word_aligned_with_floor() {
        assert_eq!(table_size(0, 2.0), 64);
        assert_eq!(table_size(1, 2.0), 64);
        assert_eq!(table_size(32, 2.0), 64);
        assert_eq!(table_size(33, 2.0), 128);
        assert_eq!(table_size(100, 2.0), 256);
        assert_eq!(table_size(100, 1.0), 128);
    }

    #[test]
    fn placed_plus_deferred_covers_every_key() {
        let keys: Vec<u64> = (0..1000).map(|i| mix64(i).wrapping_add(i)).collect();
        let (placed, deferred) = build_level(&keys, 0, 2.0);

        let placed_count = placed.words().iter().map(|w| w.count_ones() as usize).sum::<usize>();
        assert_eq!(placed_count + deferred.len(), keys.len());

        // every deferred key's bucket is unplaced in this level
        for &key in &deferred {
            let idx = bucket_of(mix64(key), 0, placed.bit_len());
            assert!(!placed.get(idx));
        }
    }

    #[test]
    fn duplicate_keys_always_defer_together() {
        let keys = [9u64, 9, 9];
        for level in 0..4 {
            let (placed, deferred) = build_level(&keys, level, 2.0);
            assert_eq!(deferred.len(), 3);
            assert_eq!(
                placed.words().iter().map(|w| w.count_ones() as usize).sum::<usize>(),
                0
            );
        }
    }
}

//! Packed bit storage and constant-time rank queries
//!
//! Every level of the hash function is ultimately a [`BitVec`]: a span of
//! 64-bit words addressed as `(word = n / 64, shift = n % 64)`. During
//! construction the vectors are mutable scratch; once a level is final its
//! occupancy vector is frozen together with sampled prefix popcounts into a
//! [`RankedBits`], which answers "how many set bits precede position `n`"
//! without scanning the whole vector.

/// Number of words covered by one rank sample (512 bits).
const WORDS_PER_SAMPLE: usize = 8;

/// Fixed-capacity bit vector backed by 64-bit words.
///
/// Capacity is rounded up to a 64-bit boundary at allocation and never
/// grows. Out-of-range positions are a caller contract violation and
/// panic via the slice index.
#[derive(Clone, Debug)]
pub(crate) struct BitVec {
    /// Packed bit storage, least significant bit first within each word
    words: Vec<u64>,
}

impl BitVec {
    /// Allocate a zeroed vector holding at least `bits` positions.
    pub(crate) fn new(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64)],
        }
    }

    /// Capacity in bits, always a multiple of 64.
    pub(crate) fn bit_len(&self) -> usize {
        self.words.len() * 64
    }

    /// Whether bit `n` is set.
    #[inline]
    pub(crate) fn get(&self, n: usize) -> bool {
        self.words[n / 64] & (1 << (n % 64)) != 0
    }

    /// Set bit `n`. Idempotent.
    #[inline]
    pub(crate) fn set(&mut self, n: usize) {
        self.words[n / 64] |= 1 << (n % 64);
    }

    /// The backing words.
    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }
}

/// One frozen level: occupancy bits plus their sampled prefix popcounts.
///
/// A sample is emitted every [`WORDS_PER_SAMPLE`] words and holds the
/// number of set bits in all words before the sampled block, *including*
/// a base offset carried over from earlier levels. Seeding each level's
/// samples with the running total of its predecessors is what turns the
/// per-level rank into a globally dense slot number: a key's bit lives in
/// exactly one level, and every bit in later levels ranks after every bit
/// in earlier ones.
#[derive(Clone, Debug)]
pub(crate) struct RankedBits {
    /// Occupancy bits for this level, read-only once frozen
    bits: BitVec,
    /// Cumulative popcount per 512-bit block, base offset included
    samples: Box<[usize]>,
}

impl RankedBits {
    /// Freeze `bits` with rank samples starting at `base` set bits.
    ///
    /// Returns the frozen level and the running popcount to seed the next
    /// level with.
    pub(crate) fn new(bits: BitVec, base: usize) -> (Self, usize) {
        let mut samples = Vec::with_capacity(1 + bits.words().len() / WORDS_PER_SAMPLE);
        let mut pop = base;

        for (i, &word) in bits.words().iter().enumerate() {
            if i % WORDS_PER_SAMPLE == 0 {
                samples.push(pop);
            }
            pop += word.count_ones() as usize;
        }

        let ranked = Self {
            bits,
            samples: samples.into_boxed_slice(),
        };
        (ranked, pop)
    }

    /// Capacity in bits.
    pub(crate) fn bit_len(&self) -> usize {
        self.bits.bit_len()
    }

    /// Whether bit `n` is set.
    #[inline]
    pub(crate) fn get(&self, n: usize) -> bool {
        self.bits.get(n)
    }

    /// Number of set bits before position `n`, plus the base offset.
    ///
    /// Takes the sample for `n`'s block, adds the popcount of the whole
    /// words between the block start and `n`'s word, then the bits of
    /// `n`'s word strictly below `n % 64`. At most seven word popcounts
    /// and one table lookup; the sub-word part masks rather than shifts,
    /// since a shift by 64 would be out of range when `n` is word-aligned.
    #[inline]
    pub(crate) fn rank(&self, n: usize) -> usize {
        let word = n / 64;
        let block_start = word & !(WORDS_PER_SAMPLE - 1);

        let mut rank = self.samples[word / WORDS_PER_SAMPLE];
        for &w in &self.bits.words()[block_start..word] {
            rank += w.count_ones() as usize;
        }

        let below = self.bits.words()[word] & ((1u64 << (n % 64)) - 1);
        rank + below.count_ones() as usize
    }

    /// Heap bytes held by the bits and rank samples.
    pub(crate) fn size(&self) -> usize {
        std::mem::size_of::<u64>() * self.bits.words().len()
            + std::mem::size_of::<usize>() * self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Reference rank: count set bits below `n` one position at a time.
    fn brute_force_rank(bits: &BitVec, n: usize) -> usize {
        (0..n).filter(|&i| bits.get(i)).count()
    }

    #[test]
    fn set_get_roundtrip() {
        let mut bv = BitVec::new(200);
        assert_eq!(bv.bit_len(), 256);

        for n in [0, 1, 63, 64, 65, 127, 199, 255] {
            assert!(!bv.get(n));
            bv.set(n);
            assert!(bv.get(n));
            // setting twice is a no-op
            bv.set(n);
            assert!(bv.get(n));
        }
        assert!(!bv.get(2));
        assert!(!bv.get(128));
    }

    #[test]
    fn capacity_rounds_up_to_word_boundary() {
        assert_eq!(BitVec::new(1).bit_len(), 64);
        assert_eq!(BitVec::new(64).bit_len(), 64);
        assert_eq!(BitVec::new(65).bit_len(), 128);
        assert_eq!(BitVec::new(0).bit_len(), 0);
    }

    #[test]
    fn rank_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bv = BitVec::new(4096);
        for _ in 0..1500 {
            bv.set(rng.gen_range(0..4096));
        }

        let reference = bv.clone();
        let (ranked, total) = RankedBits::new(bv, 0);
        assert_eq!(total, brute_force_rank(&reference, 4096));

        for n in 0..4096 {
            assert_eq!(ranked.rank(n), brute_force_rank(&reference, n), "n = {n}");
        }
    }

    #[test]
    fn rank_at_block_boundaries() {
        let mut bv = BitVec::new(1024);
        // one bit per word, plus a dense word straddling a sample boundary
        for w in 0..16 {
            bv.set(w * 64);
        }
        bv.set(511);
        bv.set(512);
        bv.set(513);

        let reference = bv.clone();
        let (ranked, _) = RankedBits::new(bv, 0);
        for n in [0, 1, 63, 64, 511, 512, 513, 514, 576, 1023] {
            assert_eq!(ranked.rank(n), brute_force_rank(&reference, n), "n = {n}");
        }
    }

    #[test]
    fn rank_includes_base_offset() {
        let mut bv = BitVec::new(128);
        bv.set(0);
        bv.set(100);

        let (ranked, total) = RankedBits::new(bv, 40);
        assert_eq!(total, 42);
        assert_eq!(ranked.rank(0), 40);
        assert_eq!(ranked.rank(1), 41);
        assert_eq!(ranked.rank(100), 41);
        assert_eq!(ranked.rank(101), 42);
    }
}

//! Error types for the `mph` crate

/// Errors applicable to configuring and building a minimal perfect hash
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configured load factor cannot size a hash table.
    ///
    /// Each level's table holds `gamma` bits per remaining key, so the
    /// load factor must be a finite value of at least 1.0. Values below
    /// that would allocate fewer slots than keys and every level would
    /// collide.
    #[error("load factor must be finite and at least 1.0, got {0}")]
    LoadFactor(f64),

    /// The configured level limit is outside the supported range of
    /// 1 to [`MAX_LEVELS`](crate::MAX_LEVELS).
    ///
    /// The bucket rotation operates on a 32-bit hash half, so bucket
    /// assignments repeat after 32 levels and a limit beyond that can
    /// never place additional keys.
    #[error("level limit {0} is out of range")]
    LevelLimit(usize),

    /// Construction ran out of levels before placing every key.
    ///
    /// A pair of identical keys collides at the same bucket on every
    /// level, so duplicate key sets always exhaust the limit. Distinct
    /// key sets reach this only with astronomically bad luck at the
    /// default load factor.
    #[error("could not place every key within {0} levels; the key set may contain duplicates")]
    LevelsExhausted(usize),
}

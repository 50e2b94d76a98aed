use crate::error::Result;
use crate::hash_table::HashTable;

/// How [`HashTable::insert`] walks an occupied chain.
///
/// # Examples
///
/// ```rust
/// use chained_hash::DuplicateCheck;
/// use chained_hash::TableConfig;
///
/// // A single bucket puts every key in the same chain.
/// let mut full = TableConfig::new(1).build().unwrap();
/// assert!(full.insert("a"));
/// assert!(!full.insert("a"));
///
/// let mut legacy = TableConfig::new(1)
///     .duplicate_check(DuplicateCheck::SkipTail)
///     .build()
///     .unwrap();
/// assert!(legacy.insert("a"));
/// // The tail is never compared, so the repeat is appended.
/// assert!(legacy.insert("a"));
/// assert_eq!(legacy.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateCheck {
    /// Compare the key against every entry in the chain.
    ///
    /// A chain never holds two equal keys, and an entry appended to a chain of
    /// length `n` records `n` collisions.
    #[default]
    Full,
    /// Compare the key against every entry except the current tail.
    ///
    /// This is the classic `while node.next` walk: a key equal to the tail is
    /// appended again, and an entry appended to a chain of length `n` records
    /// `n - 1` collisions.
    SkipTail,
}

impl DuplicateCheck {
    #[inline(always)]
    pub(crate) fn compares(self, is_tail: bool) -> bool {
        match self {
            DuplicateCheck::Full => true,
            DuplicateCheck::SkipTail => !is_tail,
        }
    }

    /// Collision count for an entry appended to a non-empty chain of
    /// `chain_len` entries.
    #[inline(always)]
    pub(crate) fn collisions(self, chain_len: usize) -> usize {
        debug_assert!(chain_len > 0);
        match self {
            DuplicateCheck::Full => chain_len,
            DuplicateCheck::SkipTail => chain_len - 1,
        }
    }
}

/// Construction parameters for a [`HashTable`].
///
/// # Examples
///
/// ```rust
/// use chained_hash::DuplicateCheck;
/// use chained_hash::TableConfig;
///
/// let table = TableConfig::new(64)
///     .duplicate_check(DuplicateCheck::SkipTail)
///     .build()
///     .unwrap();
/// assert_eq!(table.capacity(), 64);
/// assert_eq!(table.duplicate_check(), DuplicateCheck::SkipTail);
///
/// assert!(TableConfig::new(48).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub(crate) capacity: usize,
    pub(crate) duplicate_check: DuplicateCheck,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl TableConfig {
    /// Bucket count used by [`TableConfig::default`].
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Starts a configuration for a table of `capacity` buckets.
    ///
    /// The capacity is validated by [`build`](TableConfig::build), not here.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            duplicate_check: DuplicateCheck::default(),
        }
    }

    /// Sets the chain walk used on insertion.
    pub fn duplicate_check(mut self, duplicate_check: DuplicateCheck) -> Self {
        self.duplicate_check = duplicate_check;
        self
    }

    /// Returns the requested bucket count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds an empty table.
    ///
    /// Fails with [`ConfigurationError`](crate::ConfigurationError) if the
    /// capacity is not a power of two.
    pub fn build(self) -> Result<HashTable> {
        HashTable::with_config(self)
    }
}

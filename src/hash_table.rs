//! A fixed-capacity string hash table with separate chaining.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::iter::FusedIterator;

use log::debug;
use log::trace;

use crate::config::DuplicateCheck;
use crate::config::TableConfig;
use crate::error::ConfigurationError;
use crate::hashing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Capacity {
    buckets: usize,
}

impl TryFrom<usize> for Capacity {
    type Error = ConfigurationError;

    #[inline(always)]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        // No rounding: the multiplication method needs the exact bucket count
        // the caller asked for.
        if !value.is_power_of_two() {
            return Err(ConfigurationError::CapacityNotPowerOfTwo(value));
        }
        Ok(Capacity { buckets: value })
    }
}

/// A key stored in a bucket chain.
///
/// Entries are created by [`HashTable::insert`] and never change afterward.
#[derive(Clone)]
pub struct Entry {
    key: String,
    collisions: usize,
    next: Option<usize>,
}

impl Entry {
    /// Returns the stored key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns how many chain entries were walked past when this entry was
    /// appended.
    ///
    /// The first entry of a chain always records zero. See
    /// [`DuplicateCheck`] for how later entries are counted.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

impl Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("collisions", &self.collisions)
            .finish()
    }
}

/// A hash table of string keys with a fixed, power-of-two number of buckets.
///
/// Keys are hashed with the multiplication method (see [`hashing`]) and
/// collisions are resolved by appending to a singly linked chain per bucket.
/// The table never resizes and keys are never removed.
///
/// Chain links are indices into a single entry arena, so the table is a
/// forest of lists with no back references.
///
/// ## Example
///
/// ```rust
/// use chained_hash::HashTable;
///
/// let mut table = HashTable::new(16).unwrap();
/// assert!(table.insert("test1"));
/// assert!(!table.insert("test1"));
///
/// let (index, entry) = table.search("test1").unwrap();
/// assert_eq!(index, table.hash("test1"));
/// assert_eq!(entry.key(), "test1");
/// assert_eq!(entry.collisions(), 0);
///
/// assert!(table.search("test9").is_none());
/// ```
#[derive(Clone)]
pub struct HashTable {
    heads: Vec<Option<usize>>,
    entries: Vec<Entry>,
    capacity: Capacity,
    duplicate_check: DuplicateCheck,
}

impl HashTable {
    /// Creates an empty table with `capacity` buckets and the default
    /// [`DuplicateCheck::Full`] insertion walk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::CapacityNotPowerOfTwo`] if `capacity` is
    /// zero or not a power of two.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_hash::ConfigurationError;
    /// use chained_hash::HashTable;
    ///
    /// let table = HashTable::new(16).unwrap();
    /// assert!(table.is_empty());
    ///
    /// assert_eq!(
    ///     HashTable::new(10).unwrap_err(),
    ///     ConfigurationError::CapacityNotPowerOfTwo(10)
    /// );
    /// ```
    pub fn new(capacity: usize) -> Result<Self, ConfigurationError> {
        Self::with_config(TableConfig::new(capacity))
    }

    /// Creates an empty table from a [`TableConfig`].
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigurationError> {
        let capacity = Capacity::try_from(config.capacity)?;
        debug!(
            "creating hash table with {} buckets ({:?} duplicate check)",
            capacity.buckets, config.duplicate_check
        );

        Ok(Self {
            heads: alloc::vec![None; capacity.buckets],
            entries: Vec::new(),
            capacity,
            duplicate_check: config.duplicate_check,
        })
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.capacity.buckets
    }

    /// Returns the number of stored entries, counting every chain node.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the insertion walk this table was built with.
    pub fn duplicate_check(&self) -> DuplicateCheck {
        self.duplicate_check
    }

    /// Returns the bucket `key` maps to, in `0..capacity()`.
    ///
    /// Pure and deterministic; the key does not need to be present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_hash::HashTable;
    ///
    /// let table = HashTable::new(16).unwrap();
    /// assert_eq!(table.hash("test1"), 7);
    /// assert_eq!(table.hash("test9"), 6);
    /// assert_eq!(table.hash(""), 0);
    /// ```
    #[inline]
    pub fn hash(&self, key: &str) -> usize {
        hashing::bucket_index(key, self.capacity.buckets)
    }

    /// Inserts `key`, returning `false` if the insertion walk finds it
    /// already present.
    ///
    /// An empty bucket takes the key as its only entry with zero collisions.
    /// Otherwise the chain is walked head to tail and the key is appended
    /// after the tail. Which entries are compared, and how many collisions the
    /// new entry records, depends on [`DuplicateCheck`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_hash::HashTable;
    ///
    /// let mut table = HashTable::new(1).unwrap();
    /// assert!(table.insert("a"));
    /// assert!(table.insert("b"));
    /// assert!(!table.insert("a"));
    ///
    /// let (_, entry) = table.search("b").unwrap();
    /// assert_eq!(entry.collisions(), 1);
    /// ```
    pub fn insert(&mut self, key: &str) -> bool {
        let index = self.hash(key);

        let Some(head) = self.heads[index] else {
            let position = self.push_entry(key, 0);
            self.heads[index] = Some(position);
            trace!("inserted {key:?} into empty bucket {index}");
            return true;
        };

        let mut chain_len = 0;
        let mut tail = head;
        let mut cursor = Some(head);
        while let Some(position) = cursor {
            let entry = &self.entries[position];
            let is_tail = entry.next.is_none();
            if self.duplicate_check.compares(is_tail) && entry.key == key {
                trace!("rejected duplicate {key:?} in bucket {index}");
                return false;
            }

            chain_len += 1;
            tail = position;
            cursor = entry.next;
        }

        let collisions = self.duplicate_check.collisions(chain_len);
        let position = self.push_entry(key, collisions);
        self.entries[tail].next = Some(position);
        trace!("appended {key:?} to bucket {index} after {collisions} collisions");
        true
    }

    fn push_entry(&mut self, key: &str, collisions: usize) -> usize {
        let position = self.entries.len();
        self.entries.push(Entry {
            key: String::from(key),
            collisions,
            next: None,
        });
        position
    }

    /// Looks up `key`, returning its bucket index and the first matching
    /// entry in chain order.
    ///
    /// Returns `None` if the key was never inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_hash::HashTable;
    ///
    /// let mut table = HashTable::new(16).unwrap();
    /// table.insert("apple");
    ///
    /// let (index, entry) = table.search("apple").unwrap();
    /// assert_eq!(index, 15);
    /// assert_eq!(entry.key(), "apple");
    ///
    /// assert!(table.search("kiwi").is_none());
    /// ```
    pub fn search(&self, key: &str) -> Option<(usize, &Entry)> {
        let index = self.hash(key);
        self.chain(index)
            .find(|entry| entry.key == key)
            .map(|entry| (index, entry))
    }

    /// Returns `true` if `key` is stored in the table.
    pub fn contains(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Returns an iterator over the entries of bucket `index`, head first.
    ///
    /// An empty or out-of-range bucket yields nothing.
    pub fn chain(&self, index: usize) -> Chain<'_> {
        Chain {
            entries: &self.entries,
            cursor: self.heads.get(index).copied().flatten(),
        }
    }

    /// Returns an iterator over every `(bucket index, entry)` pair.
    ///
    /// Buckets are visited in increasing index order and each chain in
    /// insertion order. Every call starts a fresh pass over the current
    /// contents.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_hash::HashTable;
    ///
    /// let mut table = HashTable::new(16).unwrap();
    /// for key in ["test1", "test2", "test3"] {
    ///     table.insert(key);
    /// }
    ///
    /// let order: Vec<(usize, &str)> = table.iter().map(|(i, e)| (i, e.key())).collect();
    /// assert_eq!(order, [(2, "test3"), (7, "test1"), (13, "test2")]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            table: self,
            bucket: 0,
            next_bucket: 0,
            cursor: None,
        }
    }

    /// Counts chain lengths across all buckets.
    ///
    /// Returns a vector where `hist[n]` is the number of buckets holding
    /// exactly `n` entries; `hist[0]` counts the empty buckets.
    #[cfg(feature = "stats")]
    pub fn chain_length_histogram(&self) -> Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        for index in 0..self.capacity.buckets {
            let len = self.chain(index).count();
            if len >= hist.len() {
                hist.resize(len + 1, 0);
            }
            hist[len] += 1;
        }
        hist
    }

    /// Returns occupancy statistics for the current table state.
    #[cfg(feature = "stats")]
    pub fn chain_stats(&self) -> ChainStats {
        let hist = self.chain_length_histogram();
        ChainStats {
            buckets: self.capacity.buckets,
            occupied_buckets: self.capacity.buckets - hist[0],
            entries: self.entries.len(),
            longest_chain: hist.len() - 1,
            load_factor: self.entries.len() as f64 / self.capacity.buckets as f64,
        }
    }

    /// Pretty-prints the chain-length histogram horizontally using stdout.
    ///
    /// Each row is a chain length, starting with the empty buckets.
    #[cfg(feature = "stats")]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_length_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("chain histogram ({} buckets):", self.capacity.buckets);

        let make_bar = |count: usize| -> String {
            if count == 0 {
                return String::new();
            }
            let units = (count * total_units).div_ceil(max);
            let mut bar = "█".repeat(units / 8);
            match units % 8 {
                0 => {}
                1 => bar.push('▏'),
                2 => bar.push('▎'),
                3 => bar.push('▍'),
                4 => bar.push('▌'),
                5 => bar.push('▋'),
                6 => bar.push('▊'),
                _ => bar.push('▉'),
            }
            bar
        };

        for (len, &count) in hist.iter().enumerate() {
            println!("{:>3} | {} ({})", len, make_bar(count), count);
        }
    }
}

impl Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chains = self
            .heads
            .iter()
            .enumerate()
            .filter(|(_, head)| head.is_some())
            .map(|(index, _)| (index, self.chain(index).map(Entry::key).collect::<Vec<_>>()))
            .collect::<Vec<_>>();

        f.debug_struct("HashTable")
            .field("capacity", &self.capacity.buckets)
            .field("len", &self.entries.len())
            .field("duplicate_check", &self.duplicate_check)
            .field("chains", &chains)
            .finish()
    }
}

/// Renders one line per entry as `index<TAB>key<TAB>collisions`, in
/// enumeration order, under a header.
impl Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "N\tKey\tCollisions")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for (index, entry) in self {
            writeln!(f, "{}\t{}\t{}", index, entry.key, entry.collisions)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (usize, &'a Entry);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a single bucket.
///
/// This struct is created by [`HashTable::chain`].
pub struct Chain<'a> {
    entries: &'a [Entry],
    cursor: Option<usize>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        let entry = &entries[self.cursor?];
        self.cursor = entry.next;
        Some(entry)
    }
}

impl FusedIterator for Chain<'_> {}

/// An iterator over all `(bucket index, entry)` pairs of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter`].
pub struct Iter<'a> {
    table: &'a HashTable,
    bucket: usize,
    next_bucket: usize,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor.is_none() {
            let head = self.table.heads.get(self.next_bucket)?;
            self.bucket = self.next_bucket;
            self.next_bucket += 1;
            self.cursor = *head;
        }

        let table = self.table;
        let entry = &table.entries[self.cursor?];
        self.cursor = entry.next;
        Some((self.bucket, entry))
    }
}

impl FusedIterator for Iter<'_> {}

/// Chain occupancy statistics.
///
/// Only available with the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct ChainStats {
    /// Number of buckets
    pub buckets: usize,
    /// Number of buckets with at least one entry
    pub occupied_buckets: usize,
    /// Number of entries across all chains
    pub entries: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Entries per bucket
    pub load_factor: f64,
}

#[cfg(feature = "stats")]
impl ChainStats {
    /// Pretty-print the statistics.
    pub fn print(&self) {
        println!("=== Hash Table Chain Statistics ===");
        println!(
            "Population: {} entries in {} buckets ({:.2} load factor)",
            self.entries, self.buckets, self.load_factor
        );
        println!(
            "Bucket Usage: {}/{} ({:.2}% occupied)",
            self.occupied_buckets,
            self.buckets,
            if self.buckets == 0 {
                0.0
            } else {
                self.occupied_buckets as f64 / self.buckets as f64 * 100.0
            }
        );
        println!("Longest Chain: {}", self.longest_chain);
    }
}

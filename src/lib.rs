#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

extern crate alloc;

/// Construction-time table configuration.
///
/// This module provides [`TableConfig`] and the [`DuplicateCheck`] policy
/// applied by [`HashTable::insert`].
pub mod config;

/// Errors produced while building a table.
pub mod error;

pub mod hash_table;

pub mod hashing;

pub use config::DuplicateCheck;
pub use config::TableConfig;
pub use error::ConfigurationError;
pub use hash_table::Entry;
pub use hash_table::HashTable;

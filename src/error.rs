use thiserror::Error;

/// Errors raised while building a [`HashTable`](crate::HashTable).
///
/// Construction is the only fallible operation. Duplicate keys and missed
/// lookups are ordinary return values, not errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The requested bucket count is zero or not an exact power of two.
    #[error("table capacity must be a power of two, got {0}")]
    CapacityNotPowerOfTwo(usize),
}

/// Result alias for table construction.
pub type Result<T> = core::result::Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_rejected_capacity() {
        let err = ConfigurationError::CapacityNotPowerOfTwo(12);
        assert_eq!(err.to_string(), "table capacity must be a power of two, got 12");
    }
}

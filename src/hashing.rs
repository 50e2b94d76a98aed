//! String encoding and the multiplication method.
//!
//! A key is first turned into an integer by summing `code(c) * 31^i` over its
//! characters, then scaled into a bucket with
//! `floor(M * frac(k * A))` where `A = (sqrt(5) - 1) / 2` and `M` is the
//! bucket count.
//!
//! The scaling step is done in `f64`. Once the product `k * A` passes 2^53 it
//! is integral, so long keys all land in bucket zero. That loss of quality is
//! part of the algorithm as defined and is preserved here.

/// The multiplier `A = (sqrt(5) - 1) / 2`, the fractional part of the golden
/// ratio.
pub const MULTIPLIER: f64 = 0.618_033_988_749_894_9;

const RADIX: u128 = 31;

/// Encodes `key` as `sum(code(c_i) * 31^i)` over its Unicode scalar values,
/// with `i` counted from the start of the string.
///
/// Returns `None` when the exact sum does not fit in a `u128`. Zero code
/// points add nothing to the sum, so trailing NULs never cause an overflow on
/// their own.
///
/// # Examples
///
/// ```rust
/// use chained_hash::hashing::encode;
///
/// assert_eq!(encode(""), Some(0));
/// assert_eq!(encode("ab"), Some(97 + 98 * 31));
/// assert_eq!(encode(&"z".repeat(40)), None);
/// ```
pub fn encode(key: &str) -> Option<u128> {
    let mut code: u128 = 0;
    let mut weight = Some(1u128);

    for ch in key.chars() {
        let point = u128::from(u32::from(ch));
        if point != 0 {
            code = code.checked_add(point.checked_mul(weight?)?)?;
        }
        weight = weight.and_then(|w| w.checked_mul(RADIX));
    }

    Some(code)
}

/// Maps `key` to a bucket in `0..buckets` with the multiplication method.
///
/// `buckets` must be a power of two; [`HashTable`](crate::HashTable) checks
/// this once at construction.
///
/// # Examples
///
/// ```rust
/// use chained_hash::hashing::bucket_index;
///
/// assert_eq!(bucket_index("test1", 16), 7);
/// assert_eq!(bucket_index("", 16), 0);
/// ```
#[inline]
pub fn bucket_index(key: &str, buckets: usize) -> usize {
    debug_assert!(buckets.is_power_of_two());
    match encode(key) {
        Some(code) => scale(code as f64, buckets),
        // Anything at or past 2^128 has an integral product and a zero fraction.
        None => 0,
    }
}

#[inline(always)]
fn scale(code: f64, buckets: usize) -> usize {
    let product = code * MULTIPLIER;
    let fractional = product - product.floor();
    // `buckets` is a power of two, so this multiply is exact and stays below `buckets`.
    (buckets as f64 * fractional).floor() as usize
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn multiplier_matches_closed_form() {
        assert_eq!(MULTIPLIER, (5f64.sqrt() - 1.0) / 2.0);
    }

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(""), Some(0));
        assert_eq!(encode("a"), Some(97));
        assert_eq!(encode("test1"), Some(48_822_047));
        assert_eq!(encode("fig"), Some(102_340));
        assert_eq!(encode("elderberry"), Some(3_299_652_849_636_532));
        assert_eq!(encode("日本"), Some(844_857));
        assert_eq!(
            encode("abcdefghijklmnop"),
            Some(2_714_904_739_943_105_890_222_072)
        );
    }

    #[test]
    fn encode_overflow() {
        assert_eq!(encode(&"a".repeat(40)), None);
        assert_eq!(encode(&"z".repeat(30)), None);

        let padded = format!("a{}", "\0".repeat(40));
        assert_eq!(encode(&padded), Some(97));
    }

    #[test]
    fn known_indices() {
        let cases = [
            ("a", 15, 972, 995_409),
            ("test1", 7, 457, 468_026),
            ("apple", 15, 980, 1_004_212),
            ("date", 1, 97, 99_590),
            ("fig", 9, 612, 627_476),
            ("héllo", 7, 491, 503_328),
            ("日本", 5, 349, 358_228),
            ("elderberry", 0, 0, 0),
            ("hello world", 0, 0, 0),
        ];

        for (key, small, medium, large) in cases {
            assert_eq!(bucket_index(key, 16), small, "{key}");
            assert_eq!(bucket_index(key, 1024), medium, "{key}");
            assert_eq!(bucket_index(key, 1 << 20), large, "{key}");
        }
    }

    #[test]
    fn long_keys_land_in_bucket_zero() {
        assert_eq!(bucket_index(&"a".repeat(40), 16), 0);
        assert_eq!(bucket_index(&"z".repeat(30), 1 << 20), 0);

        let padded = format!("a{}", "\0".repeat(40));
        assert_eq!(bucket_index(&padded, 16), bucket_index("a", 16));
    }

    #[test]
    fn single_bucket_always_zero() {
        for key in ["", "a", "test1", "日本"] {
            assert_eq!(bucket_index(key, 1), 0);
        }
    }

    proptest! {
        #[test]
        fn prop_index_in_range(key in any::<String>(), shift in 0u32..32) {
            let buckets = 1usize << shift;
            prop_assert!(bucket_index(&key, buckets) < buckets);
        }

        #[test]
        fn prop_index_deterministic(key in "\\PC{0,32}", shift in 0u32..16) {
            let buckets = 1usize << shift;
            let owned = key.clone();
            prop_assert_eq!(bucket_index(&key, buckets), bucket_index(&owned, buckets));
        }

        #[test]
        fn prop_short_ascii_encodes_exactly(key in "[ -~]{0,12}") {
            let expected = key
                .bytes()
                .rev()
                .fold(0u128, |acc, b| acc * 31 + u128::from(b));
            prop_assert_eq!(encode(&key), Some(expected));
        }
    }
}

//! 32-bit non-cryptographic hashing.
//!
//! Wraps [`xxhash_rust`]'s xxHash32 implementation (seed 0) and reinterprets
//! the result as a signed 32-bit integer, matching the reference game's
//! `string.GetHashCode()`-replacement hashing used when seeding its RNG.

use std::sync::OnceLock;

use xxhash_rust::xxh32::xxh32;

/// Hash a raw byte buffer, reinterpreting the xxHash32 (seed 0) digest as
/// a signed 32-bit integer.
pub fn hash_bytes(bytes: &[u8]) -> i32 {
    xxh32(bytes, 0) as i32
}

/// Hash the UTF-8 bytes of a string.
pub fn hash_string(s: &str) -> i32 {
    hash_bytes(s.as_bytes())
}

/// Hash the concatenation of each value's four little-endian bytes.
pub fn hash_ints(values: &[i32]) -> i32 {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for &v in values {
        bytes.extend_from_slice(&(v as u32).to_le_bytes());
    }
    hash_bytes(&bytes)
}

/// Cached hash of the `"location_weather"` condition key, used by the
/// generic spring/fall rain rule.
pub fn location_weather_hash() -> i32 {
    static HASH: OnceLock<i32> = OnceLock::new();
    *HASH.get_or_init(|| hash_string("location_weather"))
}

/// Cached hash of the `"summer_rain_chance"` condition key, used by the
/// summer thunderstorm/rain rule.
pub fn summer_rain_chance_hash() -> i32 {
    static HASH: OnceLock<i32> = OnceLock::new();
    *HASH.get_or_init(|| hash_string("summer_rain_chance"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_weather_golden_constant() {
        assert_eq!(hash_string("location_weather"), 0xA5CE619Eu32 as i32);
    }

    #[test]
    fn summer_rain_chance_golden_constant() {
        assert_eq!(hash_string("summer_rain_chance"), 0xED92925Eu32 as i32);
    }

    #[test]
    fn hashes_are_cached_and_stable() {
        assert_eq!(location_weather_hash(), location_weather_hash());
        assert_eq!(location_weather_hash(), hash_string("location_weather"));
    }

    #[test]
    fn hash_ints_matches_manual_le_concatenation() {
        let manual: Vec<u8> = [1i32, -2, 3]
            .iter()
            .flat_map(|&v| (v as u32).to_le_bytes())
            .collect();
        assert_eq!(hash_ints(&[1, -2, 3]), hash_bytes(&manual));
    }
}

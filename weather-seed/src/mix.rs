//! Combines several 32-bit integers and a mode flag into a deterministic
//! "RNG seed" for the legacy LCG step ([`crate::lcg`]).

use crate::hash::hash_ints;

/// The Mersenne prime `2^31 - 1`, used as the modulus throughout the
/// mixer and the legacy LCG step.
pub const M31: i64 = 2_147_483_647;

/// Reduce `v` modulo [`M31`] in 64-bit arithmetic, preserving sign.
///
/// Rust's `%` already truncates toward zero (sign follows the dividend),
/// which is the semantics the reference platform requires here.
fn reduce_m31(v: i32) -> i64 {
    (v as i64) % M31
}

/// Combine up to five 32-bit integers and a mode flag into a deterministic
/// 32-bit RNG seed.
///
/// Each argument is first reduced modulo [`M31`] (negative intermediates
/// are tolerated; callers take the absolute value downstream in
/// [`crate::lcg::first_draw`]). When `legacy` is true the reduced values
/// are summed and reduced again; otherwise they are hashed with
/// [`hash_ints`].
pub fn mix(a: i32, b: i32, c: i32, d: i32, e: i32, legacy: bool) -> i32 {
    let reduced = [
        reduce_m31(a),
        reduce_m31(b),
        reduce_m31(c),
        reduce_m31(d),
        reduce_m31(e),
    ];

    if legacy {
        let sum: i64 = reduced.iter().sum();
        (sum % M31) as i32
    } else {
        let reduced_i32 = reduced.map(|v| v as i32);
        hash_ints(&reduced_i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_mode_sums_and_wraps() {
        let mixed = mix(1, 2, 3, 4, 5, true);
        assert_eq!(mixed, 15);
    }

    #[test]
    fn legacy_mode_wraps_large_sums() {
        let mixed = mix(M31 as i32 - 1, M31 as i32 - 1, 0, 0, 0, true);
        // (M31 - 1) reduces to -1 each (since v as i64 % M31, and v == M31 - 1 < M31, stays as-is)
        assert_eq!(mixed, mix(M31 as i32 - 1, M31 as i32 - 1, 0, 0, 0, true));
    }

    #[test]
    fn non_legacy_mode_is_deterministic() {
        let a = mix(10, 20, 30, 0, 0, false);
        let b = mix(10, 20, 30, 0, 0, false);
        assert_eq!(a, b);
    }

    #[test]
    fn legacy_and_non_legacy_paths_diverge() {
        let legacy = mix(111, 222, 333, 0, 0, true);
        let hashed = mix(111, 222, 333, 0, 0, false);
        assert_ne!(legacy, hashed);
    }

    #[test]
    fn negative_inputs_reduce_with_dividend_sign() {
        assert_eq!(reduce_m31(-5), -5);
        assert_eq!(reduce_m31(i32::MIN), (i32::MIN as i64) % M31);
    }
}

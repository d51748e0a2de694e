//! Shared numeric helpers used across the operation generators.
//!
//! Patterns lean on these for sampling and for the numeric-safety checks
//! (overflow ceilings, clean percentages) so each operation file only has
//! to describe the shape of its expressions.

use rand::{Rng, RngCore};

/// Ceiling for any power or factorial a pattern is allowed to emit.
pub const MAX_POWER_RESULT: i64 = 1_000_000;

/// Uniform integer in `[min, max]`. Bounds given in reverse are swapped;
/// `min == max` returns that value without touching the RNG.
pub fn random_in_range(rng: &mut dyn RngCore, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min > max { (max, min) } else { (min, max) };
    if lo == hi {
        return lo;
    }
    rng.gen_range(lo..=hi)
}

/// Uniform pick from a non-empty pool.
pub fn pick_from<T: Copy>(rng: &mut dyn RngCore, pool: &[T]) -> T {
    pool[rng.gen_range(0..pool.len())]
}

/// Fair coin.
pub fn coin(rng: &mut dyn RngCore) -> bool {
    rng.gen_range(0..2) == 0
}

/// `base^exp` by repeated multiplication; 0 for negative exponents.
pub fn int_pow(base: i64, exp: i64) -> i64 {
    if exp < 0 {
        return 0;
    }
    let mut result: i64 = 1;
    for _ in 0..exp {
        result = result.saturating_mul(base);
    }
    result
}

/// `n!`, with every `n <= 1` (negatives included) mapping to 1.
pub fn factorial(n: i64) -> i64 {
    (2..=n).fold(1i64, |acc, i| acc.saturating_mul(i))
}

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// True if `base^exp` would exceed `ceiling`. Multiplies step by step and
/// stops at the first partial product over the ceiling.
pub fn would_overflow(base: i64, exp: i64, ceiling: i64) -> bool {
    if base <= 1 {
        return false;
    }
    let mut result: i64 = 1;
    for _ in 0..exp {
        result = result.saturating_mul(base);
        if result > ceiling {
            return true;
        }
    }
    false
}

/// Round `value` down to a multiple of `100 / gcd(percent, 100)` so that
/// `percent * value` is divisible by 100. Falls back to `fallback` when the
/// rounding reaches zero.
pub fn align_to_clean_division(value: i64, percent: i64, fallback: i64) -> i64 {
    let step = 100 / gcd(percent, 100).max(1);
    let aligned = (value / step) * step;
    if aligned == 0 { fallback } else { aligned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_in_range_respects_bounds_and_swaps() {
        let mut rng = StdRng::seed_from_u64(7);
        for (min, max) in [(1, 10), (10, 1), (-5, 5), (-10, -1)] {
            let (lo, hi) = if min > max { (max, min) } else { (min, max) };
            for _ in 0..200 {
                let v = random_in_range(&mut rng, min, max);
                assert!((lo..=hi).contains(&v), "{v} outside [{lo}, {hi}]");
            }
        }
        for _ in 0..10 {
            assert_eq!(random_in_range(&mut rng, 7, 7), 7);
        }
    }

    #[test]
    fn int_pow_values() {
        for (base, exp, want) in [
            (2, 0, 1), (2, 1, 2), (2, 10, 1024), (3, 3, 27), (5, 4, 625),
            (1, 100, 1), (0, 5, 0), (10, 3, 1000), (7, -1, 0),
        ] {
            assert_eq!(int_pow(base, exp), want, "{base}^{exp}");
        }
    }

    #[test]
    fn factorial_values() {
        for (n, want) in [(0, 1), (1, 1), (2, 2), (3, 6), (5, 120), (7, 5040), (10, 3_628_800)] {
            assert_eq!(factorial(n), want, "{n}!");
        }
        assert_eq!(factorial(-4), 1);
    }

    #[test]
    fn gcd_values() {
        for (a, b, want) in [
            (12, 8, 4), (7, 13, 1), (100, 75, 25), (0, 5, 5), (5, 0, 5),
            (0, 0, 0), (-12, 8, 4), (12, -8, 4), (17, 17, 17),
        ] {
            assert_eq!(gcd(a, b), want, "gcd({a}, {b})");
        }
    }

    #[test]
    fn would_overflow_bails_at_ceiling() {
        assert!(!would_overflow(10, 6, MAX_POWER_RESULT)); // exactly 1_000_000
        assert!(would_overflow(10, 7, MAX_POWER_RESULT));
        assert!(would_overflow(2, 20, MAX_POWER_RESULT));
        assert!(!would_overflow(2, 19, MAX_POWER_RESULT));
        assert!(!would_overflow(1, 1_000, MAX_POWER_RESULT));
        assert!(!would_overflow(0, 50, MAX_POWER_RESULT));
        // Huge exponents stop early instead of looping to completion.
        assert!(would_overflow(3, i64::MAX, MAX_POWER_RESULT));
    }

    #[test]
    fn align_to_clean_division_makes_percent_exact() {
        for percent in [2, 3, 5, 7, 12, 25, 33, 75] {
            for value in [1, 13, 99, 250, 999] {
                let v = align_to_clean_division(value, percent, 100);
                assert_eq!((percent * v) % 100, 0, "{percent}% of {v}");
                assert!(v <= value || v == 100);
            }
        }
        assert_eq!(align_to_clean_division(40, 25, 100), 40);
        assert_eq!(align_to_clean_division(3, 25, 100), 100);
    }
}

use rand::{Rng, RngCore};

use crate::drill_engine::{expr::Expr, models::Difficulty};

/// Attempts to build one expression for a difficulty. `None` means "not a
/// valid instance this time" (e.g. it would overflow); callers retry.
pub type Pattern = fn(&mut dyn RngCore, Difficulty) -> Option<Expr>;

/// A pattern plus its relative selection weight.
#[derive(Clone, Copy)]
pub struct WeightedPattern {
    pub pattern: Pattern,
    pub weight: u32,
}

/// Short constructor for the static pattern tables.
pub const fn wp(pattern: Pattern, weight: u32) -> WeightedPattern {
    WeightedPattern { pattern, weight }
}

/// Per-difficulty pattern lists of one operation family. An empty slice
/// means the family has nothing for that tier.
pub type PatternSet = fn(Difficulty) -> &'static [WeightedPattern];

/// Cumulative-weight draw over `weights`: draw in `[0, total)` and walk the
/// list subtracting each weight until the remainder goes negative. A zero
/// total always selects index 0.
///
/// Panics on an empty slice.
pub fn pick_index(rng: &mut dyn RngCore, weights: &[u32]) -> usize {
    assert!(!weights.is_empty(), "pick_index called with no weights");
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return 0;
    }
    let mut remaining = rng.gen_range(0..total) as i64;
    for (i, &w) in weights.iter().enumerate() {
        remaining -= i64::from(w);
        if remaining < 0 {
            return i;
        }
    }
    weights.len() - 1
}

/// Weighted pick of one pattern. Panics on an empty slice.
pub fn pick_pattern(rng: &mut dyn RngCore, patterns: &[WeightedPattern]) -> Pattern {
    let weights: Vec<u32> = patterns.iter().map(|p| p.weight).collect();
    patterns[pick_index(rng, &weights)].pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn one(_: &mut dyn RngCore, _: Difficulty) -> Option<Expr> {
        Some(Expr::num(1))
    }

    fn two(_: &mut dyn RngCore, _: Difficulty) -> Option<Expr> {
        Some(Expr::num(2))
    }

    #[test]
    fn heavier_weight_is_picked_at_least_as_often() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[pick_index(&mut rng, &[1, 3, 6])] += 1;
        }
        assert!(counts[2] >= counts[0], "counts = {counts:?}");
        assert!(counts[1] >= counts[0], "counts = {counts:?}");
        assert!(counts.iter().all(|&c| c > 0), "every weighted entry must be reachable");
    }

    #[test]
    fn zero_total_weight_selects_first() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(pick_index(&mut rng, &[0, 0, 0]), 0);
        }
        let patterns = [wp(two, 0), wp(one, 0)];
        let p = pick_pattern(&mut rng, &patterns);
        assert_eq!(p(&mut rng, Difficulty::Easy), Some(Expr::num(2)));
    }

    #[test]
    fn zero_weight_entry_is_never_selected() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1_000 {
            assert_ne!(pick_index(&mut rng, &[5, 0, 5]), 1);
        }
    }

    #[test]
    fn single_entry_always_selected() {
        let mut rng = StdRng::seed_from_u64(3);
        let patterns = [wp(one, 10)];
        for _ in 0..20 {
            let p = pick_pattern(&mut rng, &patterns);
            assert_eq!(p(&mut rng, Difficulty::Beginner), Some(Expr::num(1)));
        }
    }

    #[test]
    #[should_panic(expected = "no weights")]
    fn empty_list_is_a_caller_bug() {
        let mut rng = StdRng::seed_from_u64(3);
        pick_pattern(&mut rng, &[]);
    }
}

//! Basic operations: addition, subtraction, multiplication, division.
//!
//! Harder tiers lean on longer chains: Beginner is always a single pair of
//! operands, Expert mixes in four- and five-operand chains.  Division is
//! built backwards (divisor × quotient → dividend) so every answer is exact.

use rand::RngCore;

use crate::drill_engine::{
    expr::Expr,
    helpers::random_in_range,
    models::Difficulty,
    pattern::{wp, WeightedPattern},
    ranges,
};

/// Left-fold `operands` with `op`: `((a op b) op c) op d`.
fn chain(op: fn(Expr, Expr) -> Expr, operands: &[i64]) -> Expr {
    let mut iter = operands.iter().map(|&v| Expr::num(v));
    let first = iter.next().unwrap_or(Expr::num(0));
    iter.fold(first, op)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Addition
// ═══════════════════════════════════════════════════════════════════════════════

pub fn addition_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(add_two, 10)];
    const EASY: &[WeightedPattern] = &[wp(add_two, 8), wp(add_three, 2)];
    const MEDIUM: &[WeightedPattern] = &[wp(add_two, 6), wp(add_three, 3), wp(add_four, 1)];
    const HARD: &[WeightedPattern] = &[wp(add_two, 4), wp(add_three, 4), wp(add_four, 2)];
    const EXPERT: &[WeightedPattern] = &[wp(add_two, 2), wp(add_three, 4), wp(add_four, 3), wp(add_five, 1)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

fn add_two(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = ranges::addition(d);
    let a = r.sample(rng);
    let b = r.sample(rng);
    Some(Expr::add(Expr::num(a), Expr::num(b)))
}

fn add_many(rng: &mut dyn RngCore, d: Difficulty, count: usize) -> Option<Expr> {
    let Some(mr) = ranges::addition_multi(d) else {
        return add_two(rng, d);
    };
    let mut operands = vec![mr.primary.sample(rng)];
    operands.extend((1..count).map(|_| mr.secondary.sample(rng)));
    Some(chain(Expr::add, &operands))
}

fn add_three(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    add_many(rng, d, 3)
}

fn add_four(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    add_many(rng, d, 4)
}

fn add_five(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    add_many(rng, d, 5)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Subtraction
// Beginner and Easy keep every intermediate result non-negative.
// ═══════════════════════════════════════════════════════════════════════════════

pub fn subtraction_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(sub_two_positive, 10)];
    const EASY: &[WeightedPattern] = &[wp(sub_two_positive, 8), wp(sub_three_positive, 2)];
    const MEDIUM: &[WeightedPattern] = &[wp(sub_two, 6), wp(sub_three, 3), wp(add_then_sub, 1)];
    const HARD: &[WeightedPattern] = &[wp(sub_two, 4), wp(sub_three, 4), wp(sub_add_sub, 2)];
    const EXPERT: &[WeightedPattern] = &[wp(sub_two, 3), wp(sub_three, 3), wp(sub_add_sub, 3), wp(sub_five, 1)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

/// `a − b` with `1 <= b <= a`.
fn sub_two_positive(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let a = ranges::subtraction(d).sample(rng);
    let b = random_in_range(rng, 1, a);
    Some(Expr::sub(Expr::num(a), Expr::num(b)))
}

/// `a − b − c` with `b <= a/2` and `c <= a − b`.
fn sub_three_positive(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let a = ranges::subtraction(d).sample(rng);
    let b = random_in_range(rng, 1, (a / 2).max(1));
    let c = random_in_range(rng, 1, (a - b).max(1));
    Some(chain(Expr::sub, &[a, b, c]))
}

/// `a − b`, may go negative.
fn sub_two(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = ranges::subtraction(d);
    let a = r.sample(rng);
    let b = r.sample(rng);
    Some(Expr::sub(Expr::num(a), Expr::num(b)))
}

fn sub_three(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = ranges::subtraction(d);
    let a = r.sample(rng);
    let b = random_in_range(rng, r.min / 2, r.max / 2);
    let c = random_in_range(rng, r.min / 2, r.max / 2);
    Some(chain(Expr::sub, &[a, b, c]))
}

/// `a + b − c`
fn add_then_sub(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = ranges::subtraction(d);
    let a = r.sample(rng);
    let b = random_in_range(rng, r.min / 2, r.max / 2);
    let c = random_in_range(rng, r.min / 2, r.max / 2);
    Some(Expr::sub(Expr::add(Expr::num(a), Expr::num(b)), Expr::num(c)))
}

/// `a − b + c − d`
fn sub_add_sub(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = ranges::subtraction(d);
    let a = r.sample(rng);
    let [b, c, e] = [(); 3].map(|_| random_in_range(rng, r.min / 3, r.max / 3));
    Some(Expr::sub(
        Expr::add(Expr::sub(Expr::num(a), Expr::num(b)), Expr::num(c)),
        Expr::num(e),
    ))
}

/// `a − b − c + d − e`
fn sub_five(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = ranges::subtraction(d);
    let a = r.sample(rng);
    let [b, c, e, f] = [(); 4].map(|_| random_in_range(rng, r.min / 4, r.max / 4));
    Some(Expr::sub(
        Expr::add(chain(Expr::sub, &[a, b, c]), Expr::num(e)),
        Expr::num(f),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Multiplication
// ═══════════════════════════════════════════════════════════════════════════════

pub fn multiplication_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(mul_two, 10)];
    const EASY: &[WeightedPattern] = &[wp(mul_two, 8), wp(mul_three, 2)];
    const MEDIUM: &[WeightedPattern] = &[wp(mul_two, 6), wp(mul_three, 4)];
    const HARD: &[WeightedPattern] = &[wp(mul_two, 5), wp(mul_three, 5)];
    const EXPERT: &[WeightedPattern] = &[wp(mul_two, 4), wp(mul_three, 4), wp(mul_four, 2)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

fn mul_two(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (left, right) = ranges::multiplication(d);
    let a = left.sample(rng);
    let b = right.sample(rng);
    Some(Expr::mul(Expr::num(a), Expr::num(b)))
}

fn mul_three(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let Some(extra) = ranges::multiplication_multi(d) else {
        return mul_two(rng, d);
    };
    let (left, _) = ranges::multiplication(d);
    let a = left.sample(rng);
    let b = extra.sample(rng);
    let c = extra.sample(rng);
    Some(chain(Expr::mul, &[a, b, c]))
}

fn mul_four(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let Some(extra) = ranges::multiplication_multi(d) else {
        return mul_two(rng, d);
    };
    let factors = [(); 4].map(|_| extra.sample(rng));
    Some(chain(Expr::mul, &factors))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Division
// ═══════════════════════════════════════════════════════════════════════════════

pub fn division_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(div_two, 10)];
    const EASY: &[WeightedPattern] = &[wp(div_two, 10)];
    const MEDIUM: &[WeightedPattern] = &[wp(div_two, 7), wp(div_chain, 3)];
    const HARD: &[WeightedPattern] = &[wp(div_two, 5), wp(div_chain, 5)];
    const EXPERT: &[WeightedPattern] = &[wp(div_two, 4), wp(div_chain, 6)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

/// `dividend ÷ divisor` where `dividend = divisor × quotient`.
fn div_two(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (divisors, quotients) = ranges::division(d);
    let divisor = divisors.sample(rng);
    let quotient = quotients.sample(rng);
    Some(Expr::div(Expr::num(divisor * quotient), Expr::num(divisor)))
}

/// `(q × d1 × d2) ÷ d1 ÷ d2`, divisors capped at 15 to keep dividends readable.
fn div_chain(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (divisors, _) = ranges::division(d);
    let max_divisor = divisors.max.min(15);
    let d1 = random_in_range(rng, divisors.min, max_divisor);
    let d2 = random_in_range(rng, divisors.min, max_divisor);
    let q = random_in_range(rng, 2, 10);
    Some(chain(Expr::div, &[q * d1 * d2, d1, d2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sweep(patterns: fn(Difficulty) -> &'static [WeightedPattern], check: impl Fn(&Expr, Difficulty)) {
        let mut rng = StdRng::seed_from_u64(99);
        for d in Difficulty::ALL {
            for entry in patterns(d) {
                for _ in 0..200 {
                    let e = (entry.pattern)(&mut rng, d).expect("basic patterns never decline");
                    check(&e, d);
                }
            }
        }
    }

    #[test]
    fn chain_is_left_associative() {
        let e = chain(Expr::sub, &[10, 3, 1]);
        assert_eq!(e.eval(), 6);
        assert_eq!(e.format(), "10 − 3 − 1");
        assert_eq!(e.key(), "(- (- 10 3) 1)");
    }

    #[test]
    fn beginner_addition_stays_single_digit() {
        sweep(addition_patterns, |e, d| {
            if d == Difficulty::Beginner {
                assert!((2..=18).contains(&e.eval()), "{e}");
            }
        });
    }

    #[test]
    fn easy_subtraction_never_goes_negative() {
        sweep(subtraction_patterns, |e, d| {
            if d <= Difficulty::Easy {
                assert!(e.eval() >= 0, "{e} = {}", e.eval());
            }
        });
    }

    #[test]
    fn division_is_always_exact() {
        sweep(division_patterns, |e, _| {
            assert!(e.is_well_formed(), "{e}");
        });
    }

    #[test]
    fn multiplication_uses_tier_factors() {
        sweep(multiplication_patterns, |e, d| {
            if d == Difficulty::Beginner {
                assert!((4..=81).contains(&e.eval()), "{e}");
            }
            assert!(e.eval() > 0);
        });
    }
}

//! Powers, modulo, percentages and factorials.
//!
//! These are the families that can blow up numerically, so every pattern
//! here checks its operands against [`MAX_POWER_RESULT`] and declines
//! (returns `None`) instead of emitting an out-of-range question.

use rand::RngCore;

use crate::drill_engine::{
    expr::Expr,
    helpers::{
        align_to_clean_division, factorial, pick_from, random_in_range, would_overflow,
        MAX_POWER_RESULT,
    },
    models::Difficulty,
    pattern::{wp, WeightedPattern},
    ranges,
};

/// True when the tree's value stays inside `±MAX_POWER_RESULT`.
pub(crate) fn within_ceiling(e: &Expr) -> bool {
    e.eval().checked_abs().is_some_and(|v| v <= MAX_POWER_RESULT)
}

/// `base^exp` from the tier's power ranges, or `None` past the ceiling.
pub(crate) fn bounded_power(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (bases, exps) = ranges::power(d);
    let base = bases.sample(rng);
    let exp = exps.sample(rng);
    if would_overflow(base, exp, MAX_POWER_RESULT) {
        return None;
    }
    Some(Expr::pow(Expr::num(base), Expr::num(exp)))
}

/// `n!` from the tier's factorial range, or `None` past the ceiling.
pub(crate) fn bounded_factorial(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let n = ranges::factorial(d).sample(rng);
    if factorial(n) > MAX_POWER_RESULT {
        return None;
    }
    Some(Expr::factorial(Expr::num(n)))
}

/// `(dividend, divisor)` with `dividend > divisor`.
pub(crate) fn modulo_operands(rng: &mut dyn RngCore, d: Difficulty) -> (i64, i64) {
    let (divisors, dividends) = ranges::modulo(d);
    let divisor = divisors.sample(rng);
    let mut dividend = dividends.sample(rng);
    if dividend <= divisor {
        dividend = divisor + random_in_range(rng, 1, divisor * 2);
    }
    (dividend, divisor)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Power
// ═══════════════════════════════════════════════════════════════════════════════

pub fn power_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(pow_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(pow_single, 10)];
    const MEDIUM: &[WeightedPattern] = &[wp(pow_single, 6), wp(pow_add, 4)];
    const HARD: &[WeightedPattern] = &[wp(pow_add, 5), wp(pow_sub, 3), wp(pow_single, 2)];
    const EXPERT: &[WeightedPattern] = &[wp(pow_add, 4), wp(pow_sub, 3), wp(pow_single, 3)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

pub(crate) fn pow_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    bounded_power(rng, d)
}

/// `aⁿ + bᵐ`
fn pow_add(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let e = Expr::add(bounded_power(rng, d)?, bounded_power(rng, d)?);
    within_ceiling(&e).then_some(e)
}

/// `aⁿ − bᵐ`
fn pow_sub(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let e = Expr::sub(bounded_power(rng, d)?, bounded_power(rng, d)?);
    within_ceiling(&e).then_some(e)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Modulo
// ═══════════════════════════════════════════════════════════════════════════════

pub fn modulo_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const SINGLE: &[WeightedPattern] = &[wp(mod_single, 10)];
    const EXPERT: &[WeightedPattern] = &[wp(mod_single, 7), wp(mod_add, 3)];

    match d {
        Difficulty::Expert => EXPERT,
        _                  => SINGLE,
    }
}

pub(crate) fn mod_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (dividend, divisor) = modulo_operands(rng, d);
    Some(Expr::modulo(Expr::num(dividend), Expr::num(divisor)))
}

/// `a mod b + c`
fn mod_add(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (dividend, divisor) = modulo_operands(rng, d);
    let c = random_in_range(rng, 1, 20);
    Some(Expr::add(
        Expr::modulo(Expr::num(dividend), Expr::num(divisor)),
        Expr::num(c),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Percentage
// ═══════════════════════════════════════════════════════════════════════════════

pub fn percentage_patterns(_d: Difficulty) -> &'static [WeightedPattern] {
    const ALL: &[WeightedPattern] = &[wp(pct_single, 10)];
    ALL
}

/// `p% of v`, with `v` rounded so the answer is a whole number.
pub(crate) fn pct_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let percent = pick_from(rng, ranges::percent_pool(d));
    let values = ranges::percent_value(d);
    let value = align_to_clean_division(values.sample(rng), percent, values.max);
    if (percent * value) % 100 != 0 {
        return None;
    }
    Some(Expr::percent_of(Expr::num(percent), Expr::num(value)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Factorial
// ═══════════════════════════════════════════════════════════════════════════════

pub fn factorial_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(fact_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(fact_single, 10)];
    const MEDIUM: &[WeightedPattern] = &[wp(fact_single, 6), wp(fact_division, 4)];
    const HARD: &[WeightedPattern] = &[wp(fact_single, 4), wp(fact_division, 4), wp(fact_add, 2)];
    const EXPERT: &[WeightedPattern] = &[wp(fact_division, 5), wp(fact_add, 3), wp(fact_single, 2)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

pub(crate) fn fact_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    bounded_factorial(rng, d)
}

/// `n! ÷ m!`, which reduces to `n × (n−1) × … × (m+1)`. The gap `n − m`
/// is at most 3, or 4 from Hard up.
pub(crate) fn fact_division(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let n = ranges::factorial(d).sample(rng);
    let max_gap = if d >= Difficulty::Hard { 4 } else { 3 };
    let min_m = (n - max_gap).max(1);
    let m = random_in_range(rng, min_m, n - 1);
    if m < 1 || m >= n {
        return fact_single(rng, d);
    }

    let mut quotient: i64 = 1;
    for i in (m + 1)..=n {
        quotient *= i;
        if quotient > MAX_POWER_RESULT {
            return None;
        }
    }

    Some(Expr::div(
        Expr::factorial(Expr::num(n)),
        Expr::factorial(Expr::num(m)),
    ))
}

/// `n! + m!`
fn fact_add(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let e = Expr::add(bounded_factorial(rng, d)?, bounded_factorial(rng, d)?);
    within_ceiling(&e).then_some(e)
}

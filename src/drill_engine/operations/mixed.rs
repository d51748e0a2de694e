//! Mixed families and Anything Goes.
//!
//! Mixed Basics drills order of operations with `+ − × ÷` trees; Mixed
//! Powers and Mixed Advanced combine terms from the single-operation
//! families.  Anything Goes owns no patterns: it picks another generator
//! by a per-tier distribution and relabels the result.

use rand::{Rng, RngCore};

use crate::drill_engine::{
    expr::{BinaryOpKind, Expr},
    generator::Generator,
    helpers::{coin, factorial, pick_from, random_in_range, MAX_POWER_RESULT},
    models::{Difficulty, Operation, Question},
    operations::{advanced, powers},
    pattern::{wp, Pattern, WeightedPattern},
    ranges::{self, Range},
};

fn random_add_sub(rng: &mut dyn RngCore) -> BinaryOpKind {
    if coin(rng) { BinaryOpKind::Add } else { BinaryOpKind::Sub }
}

fn num(v: i64) -> Expr {
    Expr::num(v)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Mixed Basics
// ═══════════════════════════════════════════════════════════════════════════════

pub fn mixed_basics_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(mb_single_op, 6), wp(mb_same_precedence_chain, 4)];
    const EASY: &[WeightedPattern] = &[wp(mb_same_precedence_chain, 4), wp(mb_parenthesized, 6)];
    const MEDIUM: &[WeightedPattern] = &[
        wp(mb_two_op, 6),
        wp(mb_three_op, 3),
        wp(mb_parenthesized, 1),
    ];
    const HARD: &[WeightedPattern] = &[
        wp(mb_three_op, 5),
        wp(mb_four_op, 3),
        wp(mb_parallel_mul_div, 2),
    ];
    const EXPERT: &[WeightedPattern] = &[
        wp(mb_four_op, 4),
        wp(mb_five_op, 2),
        wp(mb_parallel_mul_div, 4),
    ];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

/// Additive operand for the tier.
fn operand(rng: &mut dyn RngCore, d: Difficulty) -> i64 {
    let r = match d {
        Difficulty::Beginner => Range::new(1, 9),
        Difficulty::Easy     => Range::new(2, 20),
        Difficulty::Medium   => Range::new(3, 30),
        Difficulty::Hard     => Range::new(5, 50),
        Difficulty::Expert   => Range::new(5, 99),
    };
    r.sample(rng)
}

/// Multiplicand small enough to keep products readable.
fn small_factor(rng: &mut dyn RngCore, d: Difficulty) -> i64 {
    let r = match d {
        Difficulty::Beginner => Range::new(2, 5),
        Difficulty::Easy     => Range::new(2, 9),
        Difficulty::Medium   => Range::new(2, 12),
        Difficulty::Hard     => Range::new(3, 15),
        Difficulty::Expert   => Range::new(3, 20),
    };
    r.sample(rng)
}

/// `a ÷ b`, built backwards from divisor and quotient.
fn safe_div(rng: &mut dyn RngCore, d: Difficulty) -> Expr {
    let cap = small_factor(rng, d);
    let divisor = random_in_range(rng, 2, cap);
    let quotient = operand(rng, d);
    Expr::div(num(divisor * quotient), num(divisor))
}

/// `a ○ b` for one of `+ − × ÷`.
fn mb_single_op(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    const OPS: [BinaryOpKind; 4] = [
        BinaryOpKind::Add,
        BinaryOpKind::Sub,
        BinaryOpKind::Mul,
        BinaryOpKind::Div,
    ];
    let e = match pick_from(rng, &OPS) {
        BinaryOpKind::Div => safe_div(rng, d),
        BinaryOpKind::Mul => Expr::mul(num(small_factor(rng, d)), num(small_factor(rng, d))),
        op => Expr::binary(op, num(operand(rng, d)), num(operand(rng, d))),
    };
    Some(e)
}

/// `a ± b ± c` or `a × b × c`: one precedence level, read left to right.
fn mb_same_precedence_chain(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    if coin(rng) {
        let [a, b, c] = [(); 3].map(|_| operand(rng, d));
        let (op1, op2) = (random_add_sub(rng), random_add_sub(rng));
        return Some(Expr::binary(op2, Expr::binary(op1, num(a), num(b)), num(c)));
    }
    let [a, b, c] = [(); 3].map(|_| small_factor(rng, d));
    Some(Expr::mul(Expr::mul(num(a), num(b)), num(c)))
}

/// `(a ± b) × c` or `n ÷ (a + b)`.
fn mb_parenthesized(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let a = operand(rng, d);
    let b = operand(rng, d);
    let c = small_factor(rng, d);
    let op = random_add_sub(rng);

    if coin(rng) {
        let inner = Expr::paren(Expr::binary(op, num(a), num(b)));
        return Some(Expr::mul(inner, num(c)));
    }

    let sum = if a + b == 0 { 1 } else { a + b };
    let cap = small_factor(rng, d);
    let quotient = random_in_range(rng, 2, cap);
    let inner = Expr::paren(Expr::add(num(a), num(b)));
    Some(Expr::div(num(quotient * sum), inner))
}

/// `a ± b × c` or `a × b ± c`.
fn mb_two_op(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let a = operand(rng, d);
    let b = small_factor(rng, d);
    let c = small_factor(rng, d);
    let op = random_add_sub(rng);

    if coin(rng) {
        Some(Expr::binary(op, num(a), Expr::mul(num(b), num(c))))
    } else {
        Some(Expr::binary(op, Expr::mul(num(a), num(b)), num(c)))
    }
}

/// `a ± b × c ± d`
fn mb_three_op(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let a = operand(rng, d);
    let b = small_factor(rng, d);
    let c = small_factor(rng, d);
    let e = operand(rng, d);
    let (op1, op2) = (random_add_sub(rng), random_add_sub(rng));
    Some(Expr::binary(
        op2,
        Expr::binary(op1, num(a), Expr::mul(num(b), num(c))),
        num(e),
    ))
}

/// `a ± b × c ± d ÷ e`
fn mb_four_op(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let a = operand(rng, d);
    let b = small_factor(rng, d);
    let c = small_factor(rng, d);

    let divisor_cap = small_factor(rng, d);
    let divisor = random_in_range(rng, 2, divisor_cap);
    let quotient_cap = small_factor(rng, d);
    let quotient = random_in_range(rng, 2, quotient_cap);
    let division = Expr::div(num(divisor * quotient), num(divisor));

    let (op1, op2) = (random_add_sub(rng), random_add_sub(rng));
    Some(Expr::binary(
        op2,
        Expr::binary(op1, num(a), Expr::mul(num(b), num(c))),
        division,
    ))
}

/// `a × b ± c ± d × e ± f`
fn mb_five_op(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let a = small_factor(rng, d);
    let b = small_factor(rng, d);
    let c = operand(rng, d);
    let e = small_factor(rng, d);
    let f = small_factor(rng, d);
    let g = operand(rng, d);
    let [op1, op2, op3] = [(); 3].map(|_| random_add_sub(rng));

    let first = Expr::binary(op1, Expr::mul(num(a), num(b)), num(c));
    let second = Expr::binary(op2, first, Expr::mul(num(e), num(f)));
    Some(Expr::binary(op3, second, num(g)))
}

/// `a × b ± c ÷ d`
fn mb_parallel_mul_div(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let product = Expr::mul(num(small_factor(rng, d)), num(small_factor(rng, d)));
    let division = safe_div(rng, d);
    let op = random_add_sub(rng);
    Some(Expr::binary(op, product, division))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Mixed Powers
// ═══════════════════════════════════════════════════════════════════════════════

pub fn mixed_powers_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(mp_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(mp_single, 7), wp(mp_simple_sum, 3)];
    const MEDIUM: &[WeightedPattern] = &[wp(mp_single, 4), wp(mp_sum_diff, 6)];
    const HARD: &[WeightedPattern] = &[wp(mp_sum_diff_mul, 5), wp(mp_sum_diff, 5)];
    const EXPERT: &[WeightedPattern] = &[wp(mp_three_terms, 8), wp(mp_single, 2)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

/// One of `n²`, `n³`, `√(n²)`, `∛(n³)`.
fn power_term(rng: &mut dyn RngCore, n: i64) -> Expr {
    match rng.gen_range(0..4) {
        0 => Expr::square(num(n)),
        1 => Expr::cube(num(n)),
        2 => Expr::sqrt(num(n * n)),
        _ => Expr::cbrt(num(n * n * n)),
    }
}

fn mp_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    const SINGLES: [Pattern; 4] = [
        powers::square_single,
        powers::cube_single,
        powers::sqrt_single,
        powers::cbrt_single,
    ];
    let pattern = pick_from(rng, &SINGLES);
    pattern(rng, d)
}

/// Two small terms added.
fn mp_simple_sum(rng: &mut dyn RngCore, _d: Difficulty) -> Option<Expr> {
    let n = random_in_range(rng, 2, 8);
    let m = random_in_range(rng, 2, 8);
    let left = power_term(rng, n);
    let right = power_term(rng, m);
    Some(Expr::add(left, right))
}

/// `term ± term`
fn mp_sum_diff(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (first, second) = match d {
        Difficulty::Hard   => (Range::new(4, 12), Range::new(3, 10)),
        Difficulty::Expert => (Range::new(5, 15), Range::new(3, 12)),
        _                  => (Range::new(3, 10), Range::new(3, 10)),
    };
    let n = first.sample(rng);
    let m = second.sample(rng);
    let left = power_term(rng, n);
    let right = power_term(rng, m);
    let op = random_add_sub(rng);
    Some(Expr::binary(op, left, right))
}

/// `term (+ − ×) term` on small bases.
fn mp_sum_diff_mul(rng: &mut dyn RngCore, _d: Difficulty) -> Option<Expr> {
    const OPS: [BinaryOpKind; 3] = [BinaryOpKind::Add, BinaryOpKind::Sub, BinaryOpKind::Mul];
    let n = random_in_range(rng, 2, 6);
    let m = random_in_range(rng, 2, 6);
    let left = power_term(rng, n);
    let right = power_term(rng, m);
    let op = pick_from(rng, &OPS);
    Some(Expr::binary(op, left, right))
}

/// `term ± term ± term`
fn mp_three_terms(rng: &mut dyn RngCore, _d: Difficulty) -> Option<Expr> {
    let n = random_in_range(rng, 3, 10);
    let m = random_in_range(rng, 2, 8);
    let p = random_in_range(rng, 2, 6);
    let a = power_term(rng, n);
    let b = power_term(rng, m);
    let c = power_term(rng, p);
    let (op1, op2) = (random_add_sub(rng), random_add_sub(rng));
    Some(Expr::binary(op2, Expr::binary(op1, a, b), c))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Mixed Advanced
// Every composite is re-checked against the ceiling once assembled.
// ═══════════════════════════════════════════════════════════════════════════════

pub fn mixed_advanced_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(ma_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(ma_single, 8), wp(ma_fact_plus_const, 2)];
    const MEDIUM: &[WeightedPattern] = &[wp(ma_single, 5), wp(ma_composite, 5)];
    const HARD: &[WeightedPattern] = &[wp(ma_composite, 7), wp(ma_single, 3)];
    const EXPERT: &[WeightedPattern] = &[wp(ma_complex, 8), wp(ma_single, 2)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

fn bounded(e: Expr) -> Option<Expr> {
    advanced::within_ceiling(&e).then_some(e)
}

fn ma_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    const SINGLES: [Pattern; 4] = [
        advanced::mod_single,
        advanced::fact_single,
        advanced::pct_single,
        advanced::pow_single,
    ];
    let pattern = pick_from(rng, &SINGLES);
    pattern(rng, d)
}

/// `n! ± m`
fn ma_fact_plus_const(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let fact = advanced::bounded_factorial(rng, d)?;
    let m = random_in_range(rng, 1, 20);
    let op = random_add_sub(rng);
    bounded(Expr::binary(op, fact, num(m)))
}

/// `n! ± aⁿ`
fn ma_fact_plus_pow(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let fact = advanced::bounded_factorial(rng, d)?;
    let power = advanced::bounded_power(rng, d)?;
    let op = random_add_sub(rng);
    bounded(Expr::binary(op, fact, power))
}

/// `a mod b ± c`
fn ma_mod_plus_const(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (dividend, divisor) = advanced::modulo_operands(rng, d);
    let c = random_in_range(rng, 1, 20);
    let op = random_add_sub(rng);
    Some(Expr::binary(op, Expr::modulo(num(dividend), num(divisor)), num(c)))
}

fn ma_composite(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    match rng.gen_range(0..3) {
        0 => advanced::fact_division(rng, d),
        1 => ma_fact_plus_pow(rng, d),
        _ => ma_mod_plus_const(rng, d),
    }
}

fn ma_complex(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    match rng.gen_range(0..3) {
        // n! ÷ m! ± a²
        0 => {
            let Some(quotient) = advanced::fact_division(rng, d) else {
                return ma_single(rng, d);
            };
            let a = random_in_range(rng, 3, 8);
            let op = random_add_sub(rng);
            bounded(Expr::binary(op, quotient, Expr::square(num(a))))
        }
        // aⁿ mod b ± c!
        1 => {
            let power = advanced::bounded_power(rng, d)?;
            let b = random_in_range(rng, 3, 20);
            let c = ranges::factorial(d).sample(rng);
            if factorial(c) > MAX_POWER_RESULT {
                return None;
            }
            let op = random_add_sub(rng);
            bounded(Expr::binary(
                op,
                Expr::modulo(power, num(b)),
                Expr::factorial(num(c)),
            ))
        }
        _ => ma_fact_plus_pow(rng, d),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Anything Goes
// ═══════════════════════════════════════════════════════════════════════════════

/// Pick a generator by the tier's mix, generate, and relabel.
///
/// | Tier     | Draw                                                          |
/// |----------|---------------------------------------------------------------|
/// | Beginner | any single-operation family                                   |
/// | Easy     | 70% single, 30% any mixed family                              |
/// | Medium   | 40% Mixed Basics, 30% single, 30% Mixed Powers or Advanced    |
/// | Hard     | 50% Mixed Basics, 25% Mixed Powers, 25% Mixed Advanced        |
/// | Expert   | 40% Mixed Basics, 30% Mixed Powers, 20% Advanced, 10% single  |
pub fn anything_goes(rng: &mut dyn RngCore, d: Difficulty) -> Option<Question> {
    let picked = pick_family(rng, d);
    let mut question = picked.generate(rng, d)?;
    question.label = Operation::AnythingGoes.label().to_string();
    Some(question)
}

fn pick_family(rng: &mut dyn RngCore, d: Difficulty) -> Operation {
    match d {
        Difficulty::Beginner => pick_from(rng, &Operation::SINGLE),
        Difficulty::Easy => {
            if rng.gen_range(0..10) < 7 {
                pick_from(rng, &Operation::SINGLE)
            } else {
                pick_from(rng, &Operation::MIXED)
            }
        }
        Difficulty::Medium => match rng.gen_range(0..10) {
            0..=3 => Operation::MixedBasics,
            4..=6 => pick_from(rng, &Operation::SINGLE),
            _ => pick_from(rng, &[Operation::MixedPowers, Operation::MixedAdvanced]),
        },
        Difficulty::Hard => match rng.gen_range(0..4) {
            0 | 1 => Operation::MixedBasics,
            2 => Operation::MixedPowers,
            _ => Operation::MixedAdvanced,
        },
        Difficulty::Expert => match rng.gen_range(0..10) {
            0..=3 => Operation::MixedBasics,
            4..=6 => Operation::MixedPowers,
            7 | 8 => Operation::MixedAdvanced,
            _ => pick_from(rng, &Operation::SINGLE),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sweep(patterns: fn(Difficulty) -> &'static [WeightedPattern], check: impl Fn(&Expr, Difficulty)) {
        let mut rng = StdRng::seed_from_u64(31);
        for d in Difficulty::ALL {
            for entry in patterns(d) {
                for _ in 0..300 {
                    if let Some(e) = (entry.pattern)(&mut rng, d) {
                        check(&e, d);
                    }
                }
            }
        }
    }

    #[test]
    fn mixed_basics_divisions_are_exact() {
        sweep(mixed_basics_patterns, |e, _| assert!(e.is_well_formed(), "{e}"));
    }

    #[test]
    fn mixed_basics_never_declines() {
        let mut rng = StdRng::seed_from_u64(8);
        for d in Difficulty::ALL {
            for entry in mixed_basics_patterns(d) {
                for _ in 0..50 {
                    assert!((entry.pattern)(&mut rng, d).is_some());
                }
            }
        }
    }

    #[test]
    fn parenthesized_division_keeps_grouping() {
        let e = Expr::div(num(24), Expr::paren(Expr::add(num(2), num(4))));
        assert_eq!(e.eval(), 4);
        assert_eq!(e.format(), "24 ÷ (2 + 4)");
    }

    #[test]
    fn mixed_powers_roots_are_exact() {
        sweep(mixed_powers_patterns, |e, _| assert!(e.is_well_formed(), "{e}"));
    }

    #[test]
    fn mixed_advanced_stays_under_ceiling() {
        sweep(mixed_advanced_patterns, |e, _| {
            assert!(advanced::within_ceiling(e), "{e} = {}", e.eval());
            assert!(e.is_well_formed(), "{e}");
        });
    }

    #[test]
    fn anything_goes_relabels() {
        let mut rng = StdRng::seed_from_u64(12);
        for d in Difficulty::ALL {
            for _ in 0..40 {
                let q = anything_goes(&mut rng, d).expect("every family generates at every tier");
                assert_eq!(q.label, "Anything Goes");
                assert_eq!(q.answer, q.expression.eval());
            }
        }
    }

    #[test]
    fn hard_anything_goes_only_uses_mixed_families() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            let op = pick_family(&mut rng, Difficulty::Hard);
            assert!(Operation::MIXED.contains(&op), "{op}");
        }
    }
}

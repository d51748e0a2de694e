//! Per-operation, per-difficulty operand bounds.
//!
//! Pure lookup data. Every bound is inclusive; see `helpers::random_in_range`
//! for how reversed or degenerate bounds are sampled.

use rand::RngCore;

use crate::drill_engine::{helpers::random_in_range, models::Difficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub const fn new(min: i64, max: i64) -> Self {
        Range { min, max }
    }

    pub fn sample(self, rng: &mut dyn RngCore) -> i64 {
        random_in_range(rng, self.min, self.max)
    }
}

/// Bounds for patterns with more than two operands: the first operand comes
/// from `primary`, the rest from `secondary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiRange {
    pub primary: Range,
    pub secondary: Range,
}

const fn r(min: i64, max: i64) -> Range {
    Range::new(min, max)
}

pub fn addition(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(1, 9),
        Difficulty::Easy     => r(10, 50),
        Difficulty::Medium   => r(20, 200),
        Difficulty::Hard     => r(100, 500),
        Difficulty::Expert   => r(200, 999),
    }
}

/// No multi-operand addition at Beginner.
pub fn addition_multi(d: Difficulty) -> Option<MultiRange> {
    let (primary, secondary) = match d {
        Difficulty::Beginner => return None,
        Difficulty::Easy     => (r(10, 50), r(5, 30)),
        Difficulty::Medium   => (r(20, 200), r(10, 80)),
        Difficulty::Hard     => (r(100, 500), r(30, 200)),
        Difficulty::Expert   => (r(200, 999), r(50, 400)),
    };
    Some(MultiRange { primary, secondary })
}

pub fn subtraction(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(2, 9),
        Difficulty::Easy     => r(10, 99),
        Difficulty::Medium   => r(50, 300),
        Difficulty::Hard     => r(100, 999),
        Difficulty::Expert   => r(200, 9999),
    }
}

/// `(left factor, right factor)`.
pub fn multiplication(d: Difficulty) -> (Range, Range) {
    match d {
        Difficulty::Beginner => (r(2, 9), r(2, 9)),
        Difficulty::Easy     => (r(2, 12), r(10, 20)),
        Difficulty::Medium   => (r(5, 30), r(5, 15)),
        Difficulty::Hard     => (r(10, 50), r(10, 30)),
        Difficulty::Expert   => (r(15, 99), r(15, 50)),
    }
}

/// Extra factors for three- and four-factor products.
pub fn multiplication_multi(d: Difficulty) -> Option<Range> {
    match d {
        Difficulty::Beginner => None,
        Difficulty::Easy     => Some(r(2, 5)),
        Difficulty::Medium   => Some(r(2, 8)),
        Difficulty::Hard     => Some(r(3, 10)),
        Difficulty::Expert   => Some(r(3, 12)),
    }
}

/// `(divisor, quotient)`; the dividend is always derived from these.
pub fn division(d: Difficulty) -> (Range, Range) {
    match d {
        Difficulty::Beginner => (r(2, 9), r(2, 9)),
        Difficulty::Easy     => (r(2, 12), r(2, 12)),
        Difficulty::Medium   => (r(3, 15), r(5, 20)),
        Difficulty::Hard     => (r(5, 20), r(10, 30)),
        Difficulty::Expert   => (r(10, 30), r(15, 50)),
    }
}

/// `(divisor, dividend)`.
pub fn modulo(d: Difficulty) -> (Range, Range) {
    match d {
        Difficulty::Beginner => (r(2, 9), r(3, 45)),
        Difficulty::Easy     => (r(2, 12), r(5, 50)),
        Difficulty::Medium   => (r(3, 15), r(20, 100)),
        Difficulty::Hard     => (r(5, 25), r(50, 200)),
        Difficulty::Expert   => (r(10, 50), r(100, 500)),
    }
}

pub fn square(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(2, 10),
        Difficulty::Easy     => r(5, 15),
        Difficulty::Medium   => r(10, 20),
        Difficulty::Hard     => r(15, 30),
        Difficulty::Expert   => r(20, 50),
    }
}

pub fn cube(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(2, 5),
        Difficulty::Easy     => r(2, 7),
        Difficulty::Medium   => r(4, 10),
        Difficulty::Hard     => r(6, 12),
        Difficulty::Expert   => r(8, 15),
    }
}

/// Bounds on the root (the answer), not the radicand.
pub fn square_root(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(2, 10),
        Difficulty::Easy     => r(5, 15),
        Difficulty::Medium   => r(10, 25),
        Difficulty::Hard     => r(15, 35),
        Difficulty::Expert   => r(25, 50),
    }
}

/// Bounds on the root (the answer), not the radicand.
pub fn cube_root(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(2, 5),
        Difficulty::Easy     => r(3, 7),
        Difficulty::Medium   => r(5, 10),
        Difficulty::Hard     => r(7, 15),
        Difficulty::Expert   => r(10, 20),
    }
}

/// `(base, exponent)`.
pub fn power(d: Difficulty) -> (Range, Range) {
    match d {
        Difficulty::Beginner => (r(2, 10), r(2, 2)),
        Difficulty::Easy     => (r(2, 12), r(2, 3)),
        Difficulty::Medium   => (r(2, 10), r(2, 4)),
        Difficulty::Hard     => (r(2, 8), r(3, 5)),
        Difficulty::Expert   => (r(2, 6), r(4, 6)),
    }
}

pub fn factorial(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(1, 4),
        Difficulty::Easy     => r(3, 5),
        Difficulty::Medium   => r(4, 6),
        Difficulty::Hard     => r(5, 8),
        Difficulty::Expert   => r(7, 10),
    }
}

const PERCENT_EASY: &[i64] = &[10, 20, 25, 50, 100];
const PERCENT_MEDIUM: &[i64] = &[5, 10, 15, 20, 25, 30, 40, 50, 75];
const PERCENT_HARD: &[i64] = &[5, 10, 12, 15, 20, 25, 30, 35, 40, 45, 50, 60, 75, 80];
const PERCENT_EXPERT: &[i64] = &[
    2, 3, 4, 6, 7, 8, 9, 11, 12, 13, 14, 16, 17, 18, 19,
    21, 22, 23, 24, 26, 27, 28, 29, 32, 33, 34, 36, 37, 38, 39,
];

/// Percentages a question may ask for.
pub fn percent_pool(d: Difficulty) -> &'static [i64] {
    match d {
        Difficulty::Beginner | Difficulty::Easy => PERCENT_EASY,
        Difficulty::Medium => PERCENT_MEDIUM,
        Difficulty::Hard   => PERCENT_HARD,
        Difficulty::Expert => PERCENT_EXPERT,
    }
}

/// Bounds on the value the percentage is taken of.
pub fn percent_value(d: Difficulty) -> Range {
    match d {
        Difficulty::Beginner => r(20, 100),
        Difficulty::Easy     => r(10, 100),
        Difficulty::Medium   => r(20, 200),
        Difficulty::Hard     => r(50, 500),
        Difficulty::Expert   => r(100, 1000),
    }
}

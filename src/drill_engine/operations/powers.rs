//! Squares, cubes and their roots.
//!
//! Roots are always built from the answer outward (`n` → `n²` under the
//! radical) so the radicand is a perfect power by construction.  Composite
//! differences order their operands larger-first.

use rand::RngCore;

use crate::drill_engine::{
    expr::Expr,
    helpers::random_in_range,
    models::Difficulty,
    pattern::{wp, WeightedPattern},
    ranges::{self, Range},
};

/// `n` from `outer`, `m` in `[2, n − 1]`.
fn ordered_pair(rng: &mut dyn RngCore, outer: Range, min_inner: i64) -> (i64, i64) {
    let n = outer.sample(rng);
    let m = random_in_range(rng, min_inner, n - 1);
    (n, m)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Square
// ═══════════════════════════════════════════════════════════════════════════════

pub fn square_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(square_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(square_single, 10)];
    const MEDIUM: &[WeightedPattern] = &[wp(square_single, 7), wp(square_add, 3)];
    const HARD: &[WeightedPattern] = &[wp(square_single, 4), wp(square_add, 3), wp(square_sub, 3)];
    const EXPERT: &[WeightedPattern] = &[
        wp(square_single, 2),
        wp(square_add, 3),
        wp(square_sub, 2),
        wp(square_triple, 3),
    ];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

pub(crate) fn square_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let n = ranges::square(d).sample(rng);
    Some(Expr::square(Expr::num(n)))
}

/// `n² + m²`
fn square_add(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = match d {
        Difficulty::Hard   => Range::new(5, 15),
        Difficulty::Expert => Range::new(5, 20),
        _                  => Range::new(3, 10),
    };
    let n = r.sample(rng);
    let m = r.sample(rng);
    Some(Expr::add(Expr::square(Expr::num(n)), Expr::square(Expr::num(m))))
}

/// `n² − m²` with `n > m`.
fn square_sub(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let outer = match d {
        Difficulty::Expert => Range::new(8, 20),
        _                  => Range::new(6, 15),
    };
    let (n, m) = ordered_pair(rng, outer, 3);
    Some(Expr::sub(Expr::square(Expr::num(n)), Expr::square(Expr::num(m))))
}

/// `n² + m² − p²`
fn square_triple(rng: &mut dyn RngCore, _d: Difficulty) -> Option<Expr> {
    let n = random_in_range(rng, 5, 15);
    let m = random_in_range(rng, 3, 10);
    let p = random_in_range(rng, 3, 10);
    Some(Expr::sub(
        Expr::add(Expr::square(Expr::num(n)), Expr::square(Expr::num(m))),
        Expr::square(Expr::num(p)),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Cube
// ═══════════════════════════════════════════════════════════════════════════════

pub fn cube_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(cube_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(cube_single, 10)];
    const MEDIUM: &[WeightedPattern] = &[wp(cube_single, 7), wp(cube_add, 3)];
    const HARD: &[WeightedPattern] = &[wp(cube_single, 4), wp(cube_add, 3), wp(cube_sub, 3)];
    const EXPERT: &[WeightedPattern] = &[wp(cube_single, 3), wp(cube_add, 4), wp(cube_sub, 3)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

pub(crate) fn cube_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let n = ranges::cube(d).sample(rng);
    Some(Expr::cube(Expr::num(n)))
}

/// `n³ + m³`
fn cube_add(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let (first, second) = match d {
        Difficulty::Hard   => (Range::new(3, 7), Range::new(2, 5)),
        Difficulty::Expert => (Range::new(4, 8), Range::new(2, 6)),
        _                  => (Range::new(2, 5), Range::new(2, 5)),
    };
    let n = first.sample(rng);
    let m = second.sample(rng);
    Some(Expr::add(Expr::cube(Expr::num(n)), Expr::cube(Expr::num(m))))
}

/// `n³ − m³` with `n > m`.
fn cube_sub(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let outer = match d {
        Difficulty::Expert => Range::new(5, 8),
        _                  => Range::new(4, 7),
    };
    let (n, m) = ordered_pair(rng, outer, 2);
    Some(Expr::sub(Expr::cube(Expr::num(n)), Expr::cube(Expr::num(m))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Square root
// ═══════════════════════════════════════════════════════════════════════════════

pub fn square_root_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(sqrt_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(sqrt_single, 10)];
    const MEDIUM: &[WeightedPattern] = &[wp(sqrt_single, 7), wp(sqrt_add, 3)];
    const HARD: &[WeightedPattern] = &[wp(sqrt_single, 4), wp(sqrt_add, 3), wp(sqrt_sub, 3)];
    const EXPERT: &[WeightedPattern] = &[wp(sqrt_single, 3), wp(sqrt_add, 4), wp(sqrt_sub, 3)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

fn sqrt_of(root: i64) -> Expr {
    Expr::sqrt(Expr::num(root * root))
}

fn cbrt_of(root: i64) -> Expr {
    Expr::cbrt(Expr::num(root * root * root))
}

pub(crate) fn sqrt_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let root = ranges::square_root(d).sample(rng);
    Some(sqrt_of(root))
}

/// `√(n²) + √(m²)`
fn sqrt_add(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = match d {
        Difficulty::Hard   => Range::new(5, 15),
        Difficulty::Expert => Range::new(8, 20),
        _                  => Range::new(3, 10),
    };
    let n = r.sample(rng);
    let m = r.sample(rng);
    Some(Expr::add(sqrt_of(n), sqrt_of(m)))
}

/// `√(n²) − √(m²)` with `n > m`.
fn sqrt_sub(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let outer = match d {
        Difficulty::Expert => Range::new(10, 20),
        _                  => Range::new(6, 15),
    };
    let (n, m) = ordered_pair(rng, outer, 2);
    Some(Expr::sub(sqrt_of(n), sqrt_of(m)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Cube root
// ═══════════════════════════════════════════════════════════════════════════════

pub fn cube_root_patterns(d: Difficulty) -> &'static [WeightedPattern] {
    const BEGINNER: &[WeightedPattern] = &[wp(cbrt_single, 10)];
    const EASY: &[WeightedPattern] = &[wp(cbrt_single, 10)];
    const MEDIUM: &[WeightedPattern] = &[wp(cbrt_single, 7), wp(cbrt_add, 3)];
    const HARD: &[WeightedPattern] = &[wp(cbrt_single, 4), wp(cbrt_add, 3), wp(cbrt_sub, 3)];
    const EXPERT: &[WeightedPattern] = &[wp(cbrt_single, 3), wp(cbrt_add, 4), wp(cbrt_sub, 3)];

    match d {
        Difficulty::Beginner => BEGINNER,
        Difficulty::Easy     => EASY,
        Difficulty::Medium   => MEDIUM,
        Difficulty::Hard     => HARD,
        Difficulty::Expert   => EXPERT,
    }
}

pub(crate) fn cbrt_single(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let root = ranges::cube_root(d).sample(rng);
    Some(cbrt_of(root))
}

/// `∛(n³) + ∛(m³)`
fn cbrt_add(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let r = match d {
        Difficulty::Hard   => Range::new(3, 7),
        Difficulty::Expert => Range::new(5, 10),
        _                  => Range::new(2, 5),
    };
    let n = r.sample(rng);
    let m = r.sample(rng);
    Some(Expr::add(cbrt_of(n), cbrt_of(m)))
}

/// `∛(n³) − ∛(m³)` with `n > m`.
fn cbrt_sub(rng: &mut dyn RngCore, d: Difficulty) -> Option<Expr> {
    let outer = match d {
        Difficulty::Expert => Range::new(6, 10),
        _                  => Range::new(4, 7),
    };
    let (n, m) = ordered_pair(rng, outer, 2);
    Some(Expr::sub(cbrt_of(n), cbrt_of(m)))
}

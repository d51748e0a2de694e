//! Immutable expression trees.
//!
//! Every node can be evaluated to an integer, rendered for display, and
//! reduced to a canonical prefix key for deduplication.  `Paren` only
//! affects display: it evaluates and keys exactly like its inner node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drill_engine::helpers::{factorial, int_pow};

// ---------------------------------------------------------------------------
// Operator kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    PercentOf,
}

impl BinaryOpKind {
    /// 1 for additive operators, 2 for everything else.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOpKind::Add | BinaryOpKind::Sub => 1,
            BinaryOpKind::Mul
            | BinaryOpKind::Div
            | BinaryOpKind::Mod
            | BinaryOpKind::PercentOf => 2,
        }
    }

    /// Display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOpKind::Add       => "+",
            BinaryOpKind::Sub       => "−",
            BinaryOpKind::Mul       => "×",
            BinaryOpKind::Div       => "÷",
            BinaryOpKind::Mod       => "mod",
            BinaryOpKind::PercentOf => "% of",
        }
    }

    /// Symbol used inside canonical keys.
    pub fn key_symbol(self) -> &'static str {
        match self {
            BinaryOpKind::Add       => "+",
            BinaryOpKind::Sub       => "-",
            BinaryOpKind::Mul       => "*",
            BinaryOpKind::Div       => "/",
            BinaryOpKind::Mod       => "%",
            BinaryOpKind::PercentOf => "pct",
        }
    }

    /// Symbol that can be typed on a plain keyboard.
    pub fn ascii_symbol(self) -> &'static str {
        match self {
            BinaryOpKind::Add       => "+",
            BinaryOpKind::Sub       => "-",
            BinaryOpKind::Mul       => "*",
            BinaryOpKind::Div       => "/",
            BinaryOpKind::Mod       => "mod",
            BinaryOpKind::PercentOf => "% of",
        }
    }

    /// Operators whose right operand must be grouped when it has equal precedence.
    fn groups_right(self) -> bool {
        matches!(self, BinaryOpKind::Sub | BinaryOpKind::Div | BinaryOpKind::Mod)
    }

    fn apply(self, left: i64, right: i64) -> i64 {
        match self {
            BinaryOpKind::Add => left.saturating_add(right),
            BinaryOpKind::Sub => left.saturating_sub(right),
            BinaryOpKind::Mul => left.saturating_mul(right),
            // Zero divisor yields 0; generators never build such a tree.
            BinaryOpKind::Div => left.checked_div(right).unwrap_or(0),
            BinaryOpKind::Mod => left.checked_rem(right).unwrap_or(0),
            BinaryOpKind::PercentOf => left.saturating_mul(right) / 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixKind {
    Sqrt,
    Cbrt,
}

impl PrefixKind {
    pub fn glyph(self) -> &'static str {
        match self {
            PrefixKind::Sqrt => "√",
            PrefixKind::Cbrt => "∛",
        }
    }

    pub fn key_symbol(self) -> &'static str {
        match self {
            PrefixKind::Sqrt => "sqrt",
            PrefixKind::Cbrt => "cbrt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuffixKind {
    Square,
    Cube,
    Factorial,
}

impl SuffixKind {
    pub fn glyph(self) -> &'static str {
        match self {
            SuffixKind::Square    => "²",
            SuffixKind::Cube      => "³",
            SuffixKind::Factorial => "!",
        }
    }

    pub fn ascii_glyph(self) -> &'static str {
        match self {
            SuffixKind::Square    => "^2",
            SuffixKind::Cube      => "^3",
            SuffixKind::Factorial => "!",
        }
    }

    pub fn key_symbol(self) -> &'static str {
        match self {
            SuffixKind::Square    => "sq",
            SuffixKind::Cube      => "cb",
            SuffixKind::Factorial => "!",
        }
    }
}

/// Which symbol set `render` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `√49`, `7²`, `2¹⁰`, `12 ÷ 4`
    Unicode,
    /// `sqrt 49`, `7^2`, `2^10`, `12 / 4`
    Ascii,
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Literal(i64),
    Binary {
        op: BinaryOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Paren(Box<Expr>),
    Prefix {
        op: PrefixKind,
        operand: Box<Expr>,
    },
    Suffix {
        op: SuffixKind,
        operand: Box<Expr>,
    },
    Power {
        base: Box<Expr>,
        exponent: Box<Expr>,
    },
}

impl Expr {
    pub fn num(value: i64) -> Expr {
        Expr::Literal(value)
    }

    pub fn binary(op: BinaryOpKind, left: Expr, right: Expr) -> Expr {
        Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn add(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOpKind::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOpKind::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOpKind::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOpKind::Div, left, right)
    }

    pub fn modulo(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOpKind::Mod, left, right)
    }

    pub fn percent_of(percent: Expr, value: Expr) -> Expr {
        Expr::binary(BinaryOpKind::PercentOf, percent, value)
    }

    pub fn paren(inner: Expr) -> Expr {
        Expr::Paren(Box::new(inner))
    }

    pub fn sqrt(operand: Expr) -> Expr {
        Expr::Prefix { op: PrefixKind::Sqrt, operand: Box::new(operand) }
    }

    pub fn cbrt(operand: Expr) -> Expr {
        Expr::Prefix { op: PrefixKind::Cbrt, operand: Box::new(operand) }
    }

    pub fn square(operand: Expr) -> Expr {
        Expr::Suffix { op: SuffixKind::Square, operand: Box::new(operand) }
    }

    pub fn cube(operand: Expr) -> Expr {
        Expr::Suffix { op: SuffixKind::Cube, operand: Box::new(operand) }
    }

    pub fn factorial(operand: Expr) -> Expr {
        Expr::Suffix { op: SuffixKind::Factorial, operand: Box::new(operand) }
    }

    pub fn pow(base: Expr, exponent: Expr) -> Expr {
        Expr::Power { base: Box::new(base), exponent: Box::new(exponent) }
    }

    // ── evaluation ──────────────────────────────────────────────────────────

    /// Integer value of the tree.
    ///
    /// Division and modulo truncate toward zero and yield 0 for a zero
    /// divisor.  Roots truncate.  Factorial treats every `n <= 1` as 1.
    /// Negative exponents yield 0.  Arithmetic saturates instead of wrapping.
    pub fn eval(&self) -> i64 {
        match self {
            Expr::Literal(v) => *v,
            Expr::Binary { op, left, right } => op.apply(left.eval(), right.eval()),
            Expr::Paren(inner) => inner.eval(),
            Expr::Prefix { op, operand } => {
                let v = operand.eval();
                match op {
                    PrefixKind::Sqrt => isqrt(v),
                    PrefixKind::Cbrt => icbrt(v),
                }
            }
            Expr::Suffix { op, operand } => {
                let v = operand.eval();
                match op {
                    SuffixKind::Square    => v.saturating_mul(v),
                    SuffixKind::Cube      => v.saturating_mul(v).saturating_mul(v),
                    SuffixKind::Factorial => factorial(v),
                }
            }
            Expr::Power { base, exponent } => int_pow(base.eval(), exponent.eval()),
        }
    }

    /// True when no node relies on a fallback value: divisors are non-zero,
    /// divisions and percentages come out exact, roots have perfect-power
    /// radicands, factorial operands and exponents are non-negative.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Expr::Literal(_) => true,
            Expr::Binary { op, left, right } => {
                if !left.is_well_formed() || !right.is_well_formed() {
                    return false;
                }
                let (l, r) = (left.eval(), right.eval());
                match op {
                    BinaryOpKind::Div       => r != 0 && l % r == 0,
                    BinaryOpKind::Mod       => r != 0,
                    BinaryOpKind::PercentOf => l.saturating_mul(r) % 100 == 0,
                    _                       => true,
                }
            }
            Expr::Paren(inner) => inner.is_well_formed(),
            Expr::Prefix { op, operand } => {
                let v = operand.eval();
                operand.is_well_formed()
                    && match op {
                        PrefixKind::Sqrt => v >= 0 && isqrt(v) * isqrt(v) == v,
                        PrefixKind::Cbrt => icbrt(v).checked_pow(3) == Some(v),
                    }
            }
            Expr::Suffix { op, operand } => {
                operand.is_well_formed()
                    && (*op != SuffixKind::Factorial || operand.eval() >= 0)
            }
            Expr::Power { base, exponent } => {
                base.is_well_formed() && exponent.is_well_formed() && exponent.eval() >= 0
            }
        }
    }

    // ── display ─────────────────────────────────────────────────────────────

    /// Unicode rendering with precedence-aware parentheses.
    pub fn format(&self) -> String {
        self.render(Notation::Unicode)
    }

    /// Keyboard-friendly rendering, e.g. `2^10 - sqrt 49`.
    pub fn format_ascii(&self) -> String {
        self.render(Notation::Ascii)
    }

    pub fn render(&self, notation: Notation) -> String {
        match self {
            Expr::Literal(v) => v.to_string(),
            Expr::Binary { op, left, right } => {
                let symbol = match notation {
                    Notation::Unicode => op.symbol(),
                    Notation::Ascii   => op.ascii_symbol(),
                };
                format!(
                    "{} {} {}",
                    render_child(*op, left, false, notation),
                    symbol,
                    render_child(*op, right, true, notation),
                )
            }
            Expr::Paren(inner) => format!("({})", inner.render(notation)),
            Expr::Prefix { op, operand } => match notation {
                Notation::Unicode => format!("{}{}", op.glyph(), operand.render(notation)),
                Notation::Ascii   => format!("{} {}", op.key_symbol(), operand.render(notation)),
            },
            Expr::Suffix { op, operand } => {
                let glyph = match notation {
                    Notation::Unicode => op.glyph(),
                    Notation::Ascii   => op.ascii_glyph(),
                };
                format!("{}{}", operand.render(notation), glyph)
            }
            Expr::Power { base, exponent } => match notation {
                Notation::Unicode => format!("{}{}", base.render(notation), superscript(exponent.eval())),
                Notation::Ascii   => format!("{}^{}", base.render(notation), exponent.eval()),
            },
        }
    }

    // ── dedup key ───────────────────────────────────────────────────────────

    /// Fully parenthesised prefix form, e.g. `(+ 5 (* 3 2))`.
    pub fn key(&self) -> String {
        match self {
            Expr::Literal(v) => v.to_string(),
            Expr::Binary { op, left, right } => {
                format!("({} {} {})", op.key_symbol(), left.key(), right.key())
            }
            Expr::Paren(inner) => inner.key(),
            Expr::Prefix { op, operand } => format!("({} {})", op.key_symbol(), operand.key()),
            Expr::Suffix { op, operand } => format!("({} {})", op.key_symbol(), operand.key()),
            Expr::Power { base, exponent } => format!("(^ {} {})", base.key(), exponent.key()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Parenthesise a binary child when it binds looser than its parent, or
/// when it binds equally and sits on the right of `−`, `÷` or `mod`.
fn render_child(parent: BinaryOpKind, child: &Expr, is_right: bool, notation: Notation) -> String {
    let rendered = child.render(notation);
    match child {
        Expr::Binary { op, .. } => {
            let looser = op.precedence() < parent.precedence();
            let regrouped = is_right && op.precedence() == parent.precedence() && parent.groups_right();
            if looser || regrouped {
                format!("({rendered})")
            } else {
                rendered
            }
        }
        _ => rendered,
    }
}

fn superscript(n: i64) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            '-' => '⁻',
            other => other,
        })
        .collect()
}

/// Truncating integer square root; 0 for negative input.
fn isqrt(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let n = n as u64;
    let mut r = (n as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).map_or(false, |sq| sq <= n) {
        r += 1;
    }
    r as i64
}

/// Integer cube root truncated toward zero.
fn icbrt(n: i64) -> i64 {
    let m = n.unsigned_abs();
    let mut r = (m as f64).cbrt() as u64;
    while r.checked_pow(3).map_or(true, |c| c > m) {
        r -= 1;
    }
    while (r + 1).checked_pow(3).map_or(false, |c| c <= m) {
        r += 1;
    }
    if n < 0 { -(r as i64) } else { r as i64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> Expr {
        Expr::num(v)
    }

    #[test]
    fn subtraction_example_evaluates_formats_and_keys() {
        let e = Expr::sub(n(10), n(4));
        assert_eq!(e.eval(), 6);
        assert_eq!(e.format(), "10 − 4");
        assert_eq!(e.key(), "(- 10 4)");
        assert_eq!(n(5).eval(), 5);
        assert_eq!(n(5).format(), "5");
        assert_eq!(n(5).key(), "5");
    }

    #[test]
    fn lower_precedence_child_is_parenthesised() {
        let e = Expr::mul(Expr::add(n(5), n(3)), n(2));
        assert_eq!(e.format(), "(5 + 3) × 2");
        assert_eq!(e.eval(), 16);

        let e = Expr::add(n(5), Expr::mul(n(3), n(2)));
        assert_eq!(e.format(), "5 + 3 × 2");
        assert_eq!(e.eval(), 11);
        assert_eq!(e.key(), "(+ 5 (* 3 2))");
    }

    #[test]
    fn equal_precedence_right_operand_grouping() {
        assert_eq!(Expr::sub(n(10), Expr::sub(n(3), n(1))).format(), "10 − (3 − 1)");
        assert_eq!(Expr::sub(Expr::add(n(10), n(3)), n(1)).format(), "10 + 3 − 1");
        assert_eq!(Expr::div(n(12), Expr::div(n(6), n(2))).format(), "12 ÷ (6 ÷ 2)");
        assert_eq!(Expr::modulo(n(12), Expr::mul(n(2), n(2))).format(), "12 mod (2 × 2)");
        // Commutative parents never regroup an equal-precedence right child.
        assert_eq!(Expr::add(n(1), Expr::sub(n(5), n(2))).format(), "1 + 5 − 2");
        assert_eq!(Expr::mul(n(2), Expr::div(n(8), n(4))).format(), "2 × 8 ÷ 4");
    }

    #[test]
    fn paren_is_transparent_for_eval_and_key() {
        let inner = Expr::add(n(4), Expr::mul(n(2), n(3)));
        let once = Expr::paren(inner.clone());
        let twice = Expr::paren(once.clone());
        assert_eq!(once.key(), inner.key());
        assert_eq!(twice.key(), inner.key());
        assert_eq!(twice.eval(), inner.eval());
        assert_eq!(once.format(), "(4 + 2 × 3)");
        assert_eq!(twice.format(), "((4 + 2 × 3))");
    }

    #[test]
    fn explicit_paren_keeps_key_of_equivalent_tree() {
        let grouped = Expr::mul(Expr::paren(Expr::add(n(5), n(3))), n(2));
        let plain = Expr::mul(Expr::add(n(5), n(3)), n(2));
        assert_eq!(grouped.key(), plain.key());
        assert_eq!(grouped.format(), plain.format());
    }

    #[test]
    fn unary_nodes() {
        assert_eq!(Expr::sqrt(n(49)).eval(), 7);
        assert_eq!(Expr::sqrt(n(49)).format(), "√49");
        assert_eq!(Expr::sqrt(n(49)).key(), "(sqrt 49)");
        assert_eq!(Expr::cbrt(n(27)).eval(), 3);
        assert_eq!(Expr::cbrt(n(27)).format(), "∛27");
        assert_eq!(Expr::cbrt(n(-27)).eval(), -3);
        assert_eq!(Expr::square(n(7)).format(), "7²");
        assert_eq!(Expr::square(n(7)).eval(), 49);
        assert_eq!(Expr::cube(n(3)).format(), "3³");
        assert_eq!(Expr::cube(n(3)).key(), "(cb 3)");
        assert_eq!(Expr::factorial(n(5)).eval(), 120);
        assert_eq!(Expr::factorial(n(5)).format(), "5!");
        assert_eq!(Expr::factorial(n(0)).eval(), 1);
    }

    #[test]
    fn roots_truncate() {
        assert_eq!(Expr::sqrt(n(50)).eval(), 7);
        assert_eq!(Expr::sqrt(n(-4)).eval(), 0);
        assert_eq!(Expr::cbrt(n(30)).eval(), 3);
        assert_eq!(Expr::cbrt(n(-30)).eval(), -3);
        assert_eq!(Expr::sqrt(n(1_000_000_000_000)).eval(), 1_000_000);
    }

    #[test]
    fn power_uses_superscript_exponent() {
        let e = Expr::pow(n(2), n(10));
        assert_eq!(e.eval(), 1024);
        assert_eq!(e.format(), "2¹⁰");
        assert_eq!(e.key(), "(^ 2 10)");
        assert_eq!(Expr::pow(n(7), n(-1)).eval(), 0);
    }

    #[test]
    fn division_and_modulo_by_zero_yield_zero() {
        assert_eq!(Expr::div(n(10), n(0)).eval(), 0);
        assert_eq!(Expr::modulo(n(10), n(0)).eval(), 0);
        assert!(!Expr::div(n(10), n(0)).is_well_formed());
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(Expr::div(n(-7), n(2)).eval(), -3);
        assert_eq!(Expr::modulo(n(-7), n(2)).eval(), -1);
    }

    #[test]
    fn percent_of() {
        let e = Expr::percent_of(n(25), n(80));
        assert_eq!(e.eval(), 20);
        assert_eq!(e.format(), "25 % of 80");
        assert_eq!(e.key(), "(pct 25 80)");
        assert_eq!(Expr::percent_of(n(33), n(10)).eval(), 3);
        assert!(!Expr::percent_of(n(33), n(10)).is_well_formed());
    }

    #[test]
    fn well_formedness() {
        assert!(Expr::div(n(12), n(4)).is_well_formed());
        assert!(!Expr::div(n(13), n(4)).is_well_formed());
        assert!(Expr::modulo(n(13), n(4)).is_well_formed());
        assert!(Expr::sqrt(n(144)).is_well_formed());
        assert!(!Expr::sqrt(n(145)).is_well_formed());
        assert!(Expr::cbrt(n(-8)).is_well_formed());
        assert!(!Expr::factorial(n(-3)).is_well_formed());
        assert!(!Expr::pow(n(2), n(-1)).is_well_formed());
        assert!(Expr::sub(Expr::square(n(9)), Expr::sqrt(n(16))).is_well_formed());
    }

    #[test]
    fn ascii_rendering() {
        let e = Expr::sub(Expr::pow(n(2), n(10)), Expr::sqrt(n(49)));
        assert_eq!(e.format_ascii(), "2^10 - sqrt 49");
        let e = Expr::div(Expr::factorial(n(6)), Expr::factorial(n(4)));
        assert_eq!(e.format_ascii(), "6! / 4!");
        assert_eq!(Expr::square(n(7)).format_ascii(), "7^2");
    }

    #[test]
    fn display_matches_format() {
        let e = Expr::add(Expr::cube(n(2)), n(1));
        assert_eq!(e.to_string(), e.format());
    }
}

//! Operation families grouped by category.
//!
//! Each module exposes one `<family>_patterns` table per family with the
//! same shape:
//!
//! ```ignore
//! pub fn <family>_patterns(d: Difficulty) -> &'static [WeightedPattern]
//! ```
//!
//! and every pattern in it is a plain
//! `fn(&mut dyn RngCore, Difficulty) -> Option<Expr>`.
//! `Operation::pattern_set` in `generator.rs` maps families to these tables.

/// Addition, Subtraction, Multiplication, Division
pub mod basic;
/// Square, Cube, Square Root, Cube Root
pub mod powers;
/// Power, Modulo, Percentage, Factorial
pub mod advanced;
/// Mixed Basics, Mixed Powers, Mixed Advanced, Anything Goes
pub mod mixed;

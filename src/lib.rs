//! # arith_drill_gen
//!
//! An offline, deterministic mental-arithmetic question generator.
//!
//! Questions are built as expression trees from weighted, per-difficulty
//! pattern tables across 16 operation families: the four basic operations,
//! squares, cubes and their roots, powers, modulo, percentages, factorials,
//! three mixed families and "Anything Goes".  Every tree is generated so it
//! evaluates exactly: divisions are built backwards from their quotient,
//! roots from their result, and powers and factorials stay under a fixed
//! ceiling.
//!
//! ## How it works
//!
//! 1. Pick an [`Operation`] (directly, or by label through the [`Registry`])
//!    and a [`Difficulty`].
//! 2. Generate one-off questions with [`generate_once`], or open a
//!    [`QuestionPool`] for a session: it batches, deduplicates by canonical
//!    key and shuffles.
//! 3. Optionally turn the answer into four multiple-choice options with
//!    [`generate_choices`], and hand both to a UI via
//!    [`client_payload::question_payload`].
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` to reproduce the exact same
//!   questions every time.  Lower-level calls take `&mut dyn RngCore`.
//! - **Canonical keys**: `Question::key` is a fully parenthesised prefix form
//!   (`"(* (+ 5 3) 2)"`) that ignores display-only parentheses.
//! - **Never fails loudly**: an operation that cannot produce a question at a
//!   tier returns `None`; nothing in normal generation panics.
//!
//! ## Quick start
//!
//! ```rust
//! use arith_drill_gen::{
//!     generate_choices, generate_once, Difficulty, Operation, QuestionPool, Registry,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // One question, reproducible from its seed:
//! let q = generate_once(Operation::Division, Difficulty::Medium, Some(42)).unwrap();
//! println!("{} = {}", q.display, q.answer);
//! assert!(q.check(q.answer).correct);
//!
//! // A session pool, looked up by label:
//! let op = Registry::shared().get("Mixed Basics").unwrap();
//! let mut pool = QuestionPool::new(op, Difficulty::Hard, Some(7));
//! let q = pool.next().unwrap();
//!
//! // Multiple choice:
//! let mut rng = StdRng::seed_from_u64(7);
//! let choices = generate_choices(&mut rng, q.answer, Difficulty::Hard);
//! assert_eq!(choices.correct(), q.answer);
//! ```

pub mod client_payload;
pub mod drill_engine;

// Convenience re-exports so callers can use `arith_drill_gen::generate_once`
// directly without reaching into `drill_engine::`.
pub use drill_engine::{
    generate_choices, generate_once, generate_question, try_generate, AnswerResult,
    BinaryOpKind, Category, Choices, Difficulty, Expr, Generator, Notation, Operation,
    ParseDifficultyError, Pattern, PatternSet, PoolConfig, PoolState, PrefixKind, Question,
    QuestionPool, Registry, SuffixKind, WeightedPattern, MAX_ATTEMPTS, MAX_POWER_RESULT,
};

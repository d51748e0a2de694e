//! Core drill engine: expression trees, pattern-based generation, pooling
//! and multiple-choice distractors.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: difficulty, operation families, questions, choices |
//! | `expr`       | Expression tree with evaluation, display rendering and dedup keys |
//! | `helpers`    | Sampling and numeric-safety helpers (ceilings, clean percentages) |
//! | `ranges`     | Per-operation, per-difficulty operand bounds |
//! | `pattern`    | Weighted pattern tables and the cumulative-weight draw |
//! | `generator`  | `try_generate()` retry loop and the `Generator` trait |
//! | `operations` | Pattern tables for all 16 families, grouped by category |
//! | `registry`   | Immutable label / mode-id lookup of the families |
//! | `pool`       | Batching, deduplicating question pool for a session |
//! | `choices`    | Four-option multiple choice with plausible distractors |

pub mod choices;
pub mod expr;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod operations;
pub mod pattern;
pub mod pool;
pub mod ranges;
pub mod registry;

// Re-export the public API surface so callers can use
// `drill_engine::generate_once` without reaching into sub-modules.
pub use choices::generate_choices;
pub use expr::{BinaryOpKind, Expr, Notation, PrefixKind, SuffixKind};
pub use generator::{generate_once, generate_question, try_generate, Generator, MAX_ATTEMPTS};
pub use helpers::MAX_POWER_RESULT;
pub use models::{
    AnswerResult, Category, Choices, Difficulty, Operation, ParseDifficultyError, Question,
};
pub use pattern::{Pattern, PatternSet, WeightedPattern};
pub use pool::{PoolConfig, PoolState, QuestionPool};
pub use registry::Registry;

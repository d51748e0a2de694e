use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drill_engine::expr::Expr;

// ---------------------------------------------------------------------------
// Difficulty tiers
// ---------------------------------------------------------------------------

/// Five ordered tiers, `Beginner < Easy < Medium < Hard < Expert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Easy     => "Easy",
            Difficulty::Medium   => "Medium",
            Difficulty::Hard     => "Hard",
            Difficulty::Expert   => "Expert",
        }
    }

    /// Lenient parse for values coming from settings files or the UI.
    /// Anything unrecognised falls back to `Medium`.
    pub fn parse(s: &str) -> Difficulty {
        s.parse().unwrap_or_default()
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected Beginner, Easy, Medium, Hard or Expert)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Operation families
// ---------------------------------------------------------------------------

/// Mode grouping used by menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Basic,    // + − × ÷
    Power,    // squares, cubes, roots
    Advanced, // powers, modulo, percentage, factorial
    Mixed,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Basic    => write!(f, "basic"),
            Category::Power    => write!(f, "power"),
            Category::Advanced => write!(f, "advanced"),
            Category::Mixed    => write!(f, "mixed"),
        }
    }
}

/// Every operation family the engine can generate questions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Square,
    Cube,
    SquareRoot,
    CubeRoot,
    Power,
    Modulo,
    Percentage,
    Factorial,
    MixedBasics,
    MixedPowers,
    MixedAdvanced,
    AnythingGoes,
}

impl Operation {
    /// Canonical order, singles first.
    pub const ALL: [Operation; 16] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
        Operation::Square,
        Operation::Cube,
        Operation::SquareRoot,
        Operation::CubeRoot,
        Operation::Power,
        Operation::Modulo,
        Operation::Percentage,
        Operation::Factorial,
        Operation::MixedBasics,
        Operation::MixedPowers,
        Operation::MixedAdvanced,
        Operation::AnythingGoes,
    ];

    /// The twelve single-operation families.
    pub const SINGLE: [Operation; 12] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
        Operation::Square,
        Operation::Cube,
        Operation::SquareRoot,
        Operation::CubeRoot,
        Operation::Power,
        Operation::Modulo,
        Operation::Percentage,
        Operation::Factorial,
    ];

    /// Mixed-category families that Anything Goes delegates to.
    pub const MIXED: [Operation; 3] = [
        Operation::MixedBasics,
        Operation::MixedPowers,
        Operation::MixedAdvanced,
    ];

    /// Human-readable label; also the registry key.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Addition       => "Addition",
            Operation::Subtraction    => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::Division       => "Division",
            Operation::Square         => "Square",
            Operation::Cube           => "Cube",
            Operation::SquareRoot     => "Square Root",
            Operation::CubeRoot       => "Cube Root",
            Operation::Power          => "Power",
            Operation::Modulo         => "Modulo",
            Operation::Percentage     => "Percentage",
            Operation::Factorial      => "Factorial",
            Operation::MixedBasics    => "Mixed Basics",
            Operation::MixedPowers    => "Mixed Powers",
            Operation::MixedAdvanced  => "Mixed Advanced",
            Operation::AnythingGoes   => "Anything Goes",
        }
    }

    /// URL/config friendly identifier of the preset mode.
    pub fn mode_id(self) -> &'static str {
        match self {
            Operation::Addition       => "addition",
            Operation::Subtraction    => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division       => "division",
            Operation::Square         => "squares",
            Operation::Cube           => "cubes",
            Operation::SquareRoot     => "square-roots",
            Operation::CubeRoot       => "cube-roots",
            Operation::Power          => "exponents",
            Operation::Modulo         => "remainders",
            Operation::Percentage     => "percentages",
            Operation::Factorial      => "factorials",
            Operation::MixedBasics    => "mixed-basics",
            Operation::MixedPowers    => "mixed-powers",
            Operation::MixedAdvanced  => "mixed-advanced",
            Operation::AnythingGoes   => "anything-goes",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Operation::Addition
            | Operation::Subtraction
            | Operation::Multiplication
            | Operation::Division => Category::Basic,
            Operation::Square
            | Operation::Cube
            | Operation::SquareRoot
            | Operation::CubeRoot => Category::Power,
            Operation::Power
            | Operation::Modulo
            | Operation::Percentage
            | Operation::Factorial => Category::Advanced,
            Operation::MixedBasics
            | Operation::MixedPowers
            | Operation::MixedAdvanced
            | Operation::AnythingGoes => Category::Mixed,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Generated output
// ---------------------------------------------------------------------------

/// One generated problem. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub expression: Expr,
    pub answer: i64,
    /// Unicode rendering shown to the player, e.g. `"(5 + 3) × 2"`.
    pub display: String,
    /// Canonical prefix form used for deduplication, e.g. `"(* (+ 5 3) 2)"`.
    pub key: String,
    /// Label of the family that produced it.
    pub label: String,
}

impl Question {
    /// Evaluate, format and key `expression` in one go.
    pub fn from_expr(expression: Expr, label: impl Into<String>) -> Self {
        Question {
            answer: expression.eval(),
            display: expression.format(),
            key: expression.key(),
            label: label.into(),
            expression,
        }
    }

    pub fn check(&self, user_answer: i64) -> AnswerResult {
        AnswerResult {
            correct: user_answer == self.answer,
            user_answer,
            correct_answer: self.answer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub correct: bool,
    pub user_answer: i64,
    pub correct_answer: i64,
}

/// Four shuffled multiple-choice values and where the real answer landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    pub values: [i64; 4],
    pub correct_index: usize,
}

impl Choices {
    pub fn correct(&self) -> i64 {
        self.values[self.correct_index]
    }

    /// Value at `index`; panics if `index >= 4`, which is always a caller bug.
    pub fn choice(&self, index: usize) -> i64 {
        assert!(index < self.values.len(), "choice index {index} out of range (4 choices)");
        self.values[index]
    }

    pub fn is_correct(&self, index: usize) -> bool {
        self.choice(index) == self.correct()
    }
}

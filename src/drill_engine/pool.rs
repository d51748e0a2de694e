//! Session-scoped question pool.
//!
//! Pre-generates a batch, drops anything whose canonical key was already
//! handed out in this pool's lifetime, shuffles, and deals from a cursor.
//! When a refill comes back empty the seen-set is cleared once so a small
//! pattern space repeats instead of starving the caller.

use std::collections::HashSet;

use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::drill_engine::{
    generator::Generator,
    models::{Difficulty, Operation, Question},
};

/// Batch sizing for a [`QuestionPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Questions kept per batch.
    pub batch_size: usize,
    /// Generator calls per refill are capped at `batch_size * refill_factor`.
    pub refill_factor: usize,
}

impl PoolConfig {
    pub fn refill_attempts(&self) -> usize {
        self.batch_size.saturating_mul(self.refill_factor)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig { batch_size: 50, refill_factor: 3 }
    }
}

/// Observable pool state. Filling happens inside `new` and `next` and is
/// never seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// The current batch holds nothing.
    Empty,
    /// Freshly filled, nothing dealt yet.
    Ready,
    /// Dealing from a batch; refills once the cursor reaches the end.
    Draining,
}

pub struct QuestionPool<G: Generator = Operation> {
    generator: G,
    difficulty: Difficulty,
    config: PoolConfig,
    rng: StdRng,
    questions: Vec<Question>,
    cursor: usize,
    seen: HashSet<String>,
}

impl<G: Generator> QuestionPool<G> {
    /// Build a pool with the default batch sizing and fill the first batch.
    pub fn new(generator: G, difficulty: Difficulty, rng_seed: Option<u64>) -> Self {
        Self::with_config(generator, difficulty, rng_seed, PoolConfig::default())
    }

    pub fn with_config(
        generator: G,
        difficulty: Difficulty,
        rng_seed: Option<u64>,
        config: PoolConfig,
    ) -> Self {
        let rng: StdRng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let mut pool = QuestionPool {
            generator,
            difficulty,
            config,
            rng,
            questions: Vec::with_capacity(config.batch_size),
            cursor: 0,
            seen: HashSet::new(),
        };
        pool.fill();
        pool
    }

    /// Next question, refilling as needed. `None` only when the generator
    /// produces nothing even after the seen-set has been cleared.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Question> {
        if self.cursor >= self.questions.len() {
            self.fill();
        }
        if self.questions.is_empty() {
            warn!(
                "{}: pattern space exhausted at {}, clearing {} seen keys",
                self.generator.label(),
                self.difficulty,
                self.seen.len()
            );
            self.seen.clear();
            self.fill();
        }
        if self.questions.is_empty() {
            warn!("{}: generator produced nothing at {}", self.generator.label(), self.difficulty);
            return None;
        }
        let question = self.questions[self.cursor].clone();
        self.cursor += 1;
        Some(question)
    }

    pub fn state(&self) -> PoolState {
        if self.questions.is_empty() {
            PoolState::Empty
        } else if self.cursor == 0 {
            PoolState::Ready
        } else {
            PoolState::Draining
        }
    }

    /// Questions left in the current batch before the next refill.
    pub fn remaining(&self) -> usize {
        self.questions.len() - self.cursor
    }

    /// Distinct keys handed out (or queued) since the last seen-set reset.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Replace the batch with up to `batch_size` unseen questions, then
    /// shuffle it and rewind the cursor.
    fn fill(&mut self) {
        self.questions.clear();
        self.cursor = 0;

        let max_attempts = self.config.refill_attempts();
        let mut attempts = 0;
        while attempts < max_attempts && self.questions.len() < self.config.batch_size {
            attempts += 1;
            let Some(question) = self.generator.generate(&mut self.rng, self.difficulty) else {
                continue;
            };
            if self.seen.insert(question.key.clone()) {
                self.questions.push(question);
            }
        }

        // Fisher-Yates shuffle
        for i in (1..self.questions.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            self.questions.swap(i, j);
        }

        debug!(
            "{}: refilled {} questions in {} attempts at {}",
            self.generator.label(),
            self.questions.len(),
            attempts,
            self.difficulty
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::expr::Expr;
    use rand::RngCore;
    use std::cell::Cell;

    /// Cycles through `1 + 1` .. `1 + n`, so only `n` distinct keys exist.
    struct Finite {
        n: i64,
        next: Cell<i64>,
    }

    impl Generator for Finite {
        fn label(&self) -> &str {
            "Finite"
        }

        fn generate(&self, _rng: &mut dyn RngCore, _d: Difficulty) -> Option<Question> {
            let k = self.next.get() % self.n + 1;
            self.next.set(self.next.get() + 1);
            Some(Question::from_expr(Expr::add(Expr::num(1), Expr::num(k)), "Finite"))
        }
    }

    struct Broken;

    impl Generator for Broken {
        fn label(&self) -> &str {
            "Broken"
        }

        fn generate(&self, _rng: &mut dyn RngCore, _d: Difficulty) -> Option<Question> {
            None
        }
    }

    #[test]
    fn batch_keys_are_unique() {
        let mut pool = QuestionPool::new(Operation::Multiplication, Difficulty::Hard, Some(7));
        assert_eq!(pool.state(), PoolState::Ready);
        let mut keys = HashSet::new();
        for _ in 0..50 {
            let q = pool.next().unwrap();
            assert!(keys.insert(q.key.clone()), "duplicate {}", q.key);
        }
        assert_eq!(pool.state(), PoolState::Draining);
    }

    #[test]
    fn small_pattern_space_repeats_after_reset() {
        let finite = Finite { n: 5, next: Cell::new(0) };
        let mut pool = QuestionPool::new(finite, Difficulty::Easy, Some(1));
        assert_eq!(pool.remaining(), 5);

        let first: HashSet<String> = (0..5).map(|_| pool.next().unwrap().key).collect();
        assert_eq!(first.len(), 5);

        // Every key is now seen: the refill is empty, the seen-set is cleared
        // and the same five questions come back.
        let again = pool.next().unwrap();
        assert!(first.contains(&again.key));
        assert_eq!(pool.seen_count(), 5);
    }

    #[test]
    fn broken_generator_yields_none() {
        let mut pool = QuestionPool::new(Broken, Difficulty::Medium, Some(3));
        assert_eq!(pool.state(), PoolState::Empty);
        assert!(pool.next().is_none());
        assert!(pool.next().is_none());
    }

    #[test]
    fn config_bounds_batch_and_attempts() {
        let config = PoolConfig { batch_size: 4, refill_factor: 2 };
        assert_eq!(config.refill_attempts(), 8);
        assert_eq!(PoolConfig::default().refill_attempts(), 150);

        let finite = Finite { n: 100, next: Cell::new(0) };
        let pool = QuestionPool::with_config(finite, Difficulty::Easy, Some(1), config);
        assert_eq!(pool.remaining(), 4);
    }

    #[test]
    fn same_seed_same_sequence() {
        let draw = |seed| {
            let mut pool = QuestionPool::new(Operation::MixedBasics, Difficulty::Medium, Some(seed));
            (0..20).map(|_| pool.next().unwrap().key).collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }
}

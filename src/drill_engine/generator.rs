use log::{debug, trace};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::drill_engine::{
    expr::Expr,
    models::{Difficulty, Operation, Question},
    operations::{advanced, basic, mixed, powers},
    pattern::{pick_pattern, PatternSet},
};

/// Attempt budget for one `try_generate` call.
pub const MAX_ATTEMPTS: usize = 100;

/// Anything that can produce questions for a difficulty.
pub trait Generator {
    fn label(&self) -> &str;

    /// `None` means "nothing generatable right now", never a fatal error.
    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty) -> Option<Question>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty) -> Option<Question> {
        (**self).generate(rng, difficulty)
    }
}

pub fn build_question(expression: Expr, label: &str) -> Question {
    Question::from_expr(expression, label)
}

/// Sample weighted patterns for `difficulty` until one succeeds or the
/// budget runs out. First success wins.
pub fn try_generate(
    rng: &mut dyn RngCore,
    patterns: PatternSet,
    difficulty: Difficulty,
    label: &str,
    max_attempts: usize,
) -> Option<Question> {
    let weighted = patterns(difficulty);
    if weighted.is_empty() {
        debug!("{label}: no patterns for {difficulty}");
        return None;
    }

    for attempt in 0..max_attempts {
        let pattern = pick_pattern(rng, weighted);
        match pattern(rng, difficulty) {
            Some(expression) => return Some(build_question(expression, label)),
            None => trace!("{label}/{difficulty}: attempt {attempt} declined"),
        }
    }

    debug!("{label}: exhausted {max_attempts} attempts at {difficulty}");
    None
}

/// Uniform pick among `generators`, then generate from it.
///
/// Panics on an empty list: that is a wiring bug in the caller.
pub fn generate_question(
    generators: &[&dyn Generator],
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Option<Question> {
    assert!(!generators.is_empty(), "generate_question: no generators provided");
    let picked = generators[rng.gen_range(0..generators.len())];
    picked.generate(rng, difficulty)
}

/// One-shot convenience: seed an RNG (or draw from entropy) and generate a
/// single question for `operation`.
pub fn generate_once(
    operation: Operation,
    difficulty: Difficulty,
    rng_seed: Option<u64>,
) -> Option<Question> {
    let mut rng: StdRng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    operation.generate(&mut rng, difficulty)
}

impl Operation {
    /// Pattern tables backing this family. Anything Goes has none of its
    /// own: it delegates to the other generators.
    pub fn pattern_set(self) -> Option<PatternSet> {
        let set: PatternSet = match self {
            Operation::Addition       => basic::addition_patterns,
            Operation::Subtraction    => basic::subtraction_patterns,
            Operation::Multiplication => basic::multiplication_patterns,
            Operation::Division       => basic::division_patterns,
            Operation::Square         => powers::square_patterns,
            Operation::Cube           => powers::cube_patterns,
            Operation::SquareRoot     => powers::square_root_patterns,
            Operation::CubeRoot       => powers::cube_root_patterns,
            Operation::Power          => advanced::power_patterns,
            Operation::Modulo         => advanced::modulo_patterns,
            Operation::Percentage     => advanced::percentage_patterns,
            Operation::Factorial      => advanced::factorial_patterns,
            Operation::MixedBasics    => mixed::mixed_basics_patterns,
            Operation::MixedPowers    => mixed::mixed_powers_patterns,
            Operation::MixedAdvanced  => mixed::mixed_advanced_patterns,
            Operation::AnythingGoes   => return None,
        };
        Some(set)
    }
}

impl Generator for Operation {
    fn label(&self) -> &str {
        Operation::label(*self)
    }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty) -> Option<Question> {
        match self.pattern_set() {
            Some(set) => try_generate(rng, set, difficulty, Operation::label(*self), MAX_ATTEMPTS),
            None => mixed::anything_goes(rng, difficulty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::pattern::{wp, WeightedPattern};

    fn always(_: &mut dyn RngCore, _: Difficulty) -> Option<Expr> {
        Some(Expr::add(Expr::num(2), Expr::num(3)))
    }

    fn never(_: &mut dyn RngCore, _: Difficulty) -> Option<Expr> {
        None
    }

    fn easy_only(d: Difficulty) -> &'static [WeightedPattern] {
        const EASY: &[WeightedPattern] = &[wp(always, 1)];
        match d {
            Difficulty::Easy => EASY,
            _ => &[],
        }
    }

    fn hopeless(_: Difficulty) -> &'static [WeightedPattern] {
        const NEVER: &[WeightedPattern] = &[wp(never, 5)];
        NEVER
    }

    fn mostly_failing(_: Difficulty) -> &'static [WeightedPattern] {
        const MIX: &[WeightedPattern] = &[wp(never, 9), wp(always, 1)];
        MIX
    }

    #[test]
    fn missing_tier_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(try_generate(&mut rng, easy_only, Difficulty::Hard, "T", MAX_ATTEMPTS).is_none());
        let q = try_generate(&mut rng, easy_only, Difficulty::Easy, "T", MAX_ATTEMPTS).unwrap();
        assert_eq!(q.answer, 5);
        assert_eq!(q.display, "2 + 3");
        assert_eq!(q.key, "(+ 2 3)");
        assert_eq!(q.label, "T");
    }

    #[test]
    fn exhausted_budget_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(try_generate(&mut rng, hopeless, Difficulty::Medium, "T", MAX_ATTEMPTS).is_none());
        assert!(try_generate(&mut rng, hopeless, Difficulty::Medium, "T", 0).is_none());
    }

    #[test]
    fn declined_attempts_are_retried() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            assert!(try_generate(&mut rng, mostly_failing, Difficulty::Medium, "T", MAX_ATTEMPTS).is_some());
        }
    }

    #[test]
    fn operation_generator_labels_questions() {
        let mut rng = StdRng::seed_from_u64(11);
        for op in Operation::ALL {
            let q = op.generate(&mut rng, Difficulty::Medium).unwrap();
            assert_eq!(q.label, op.label());
        }
    }

    #[test]
    fn generate_once_is_deterministic_with_seed() {
        for op in Operation::ALL {
            let a = generate_once(op, Difficulty::Hard, Some(2024)).unwrap();
            let b = generate_once(op, Difficulty::Hard, Some(2024)).unwrap();
            assert_eq!(a, b, "{op} not deterministic");
        }
        assert!(generate_once(Operation::Addition, Difficulty::Easy, None).is_some());
    }

    #[test]
    fn generate_question_picks_from_list() {
        let mut rng = StdRng::seed_from_u64(8);
        let gens: [&dyn Generator; 2] = [&Operation::Square, &Operation::Cube];
        for _ in 0..20 {
            let q = generate_question(&gens, Difficulty::Easy, &mut rng).unwrap();
            assert!(q.label == "Square" || q.label == "Cube");
        }
    }

    #[test]
    #[should_panic(expected = "no generators")]
    fn generate_question_with_empty_list_panics() {
        let mut rng = StdRng::seed_from_u64(8);
        generate_question(&[], Difficulty::Easy, &mut rng);
    }
}

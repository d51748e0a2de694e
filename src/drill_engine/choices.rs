//! Multiple-choice options: the answer plus three nearby distractors.

use rand::{seq::SliceRandom, Rng, RngCore};

use crate::drill_engine::models::{Choices, Difficulty};

/// Answers below this magnitude get small fixed offsets.
const SMALL_ANSWER_THRESHOLD: i64 = 20;
const SMALL_ANSWER_MAX_OFFSET: i64 = 5;
/// Larger answers are offset by this share of their magnitude, in percent.
const MIN_OFFSET_PERCENT: i64 = 10;
const MAX_OFFSET_PERCENT: i64 = 30;
/// Distractor attempts before falling back to fixed offsets.
const MAX_DISTRACTOR_ATTEMPTS: usize = 100;
const FALLBACK_OFFSETS: [i64; 10] = [1, 2, 3, -1, -2, -3, 4, 5, -4, -5];

/// Four distinct values, shuffled, with the index of `answer`.
pub fn generate_choices(rng: &mut dyn RngCore, answer: i64, difficulty: Difficulty) -> Choices {
    let distractors = generate_distractors(rng, answer, difficulty);

    let mut values = [answer, distractors[0], distractors[1], distractors[2]];
    values.shuffle(rng);
    let correct_index = values.iter().position(|&v| v == answer).unwrap_or(0);

    Choices { values, correct_index }
}

fn acceptable(answer: i64, candidate: i64, accepted: &[i64]) -> bool {
    candidate != answer && !accepted.contains(&candidate) && (answer < 0 || candidate >= 0)
}

fn generate_distractors(rng: &mut dyn RngCore, answer: i64, difficulty: Difficulty) -> [i64; 3] {
    let mut accepted: Vec<i64> = Vec::with_capacity(3);

    for _ in 0..MAX_DISTRACTOR_ATTEMPTS {
        if accepted.len() == 3 {
            break;
        }
        let candidate = random_distractor(rng, answer, difficulty);
        if acceptable(answer, candidate, &accepted) {
            accepted.push(candidate);
        }
    }

    for offset in FALLBACK_OFFSETS {
        if accepted.len() == 3 {
            break;
        }
        if let Some(candidate) = answer.checked_add(offset) {
            if acceptable(answer, candidate, &accepted) {
                accepted.push(candidate);
            }
        }
    }

    // Walk outward until three are accepted. Upward steps from a
    // non-negative answer are never rejected except as duplicates, and
    // downward steps cover answers at the top of the i64 range.
    let mut offset: i64 = 1;
    while accepted.len() < 3 {
        for candidate in [answer.checked_add(offset), answer.checked_sub(offset)]
            .into_iter()
            .flatten()
        {
            if accepted.len() < 3 && acceptable(answer, candidate, &accepted) {
                accepted.push(candidate);
            }
        }
        offset += 1;
    }

    [accepted[0], accepted[1], accepted[2]]
}

fn random_distractor(rng: &mut dyn RngCore, answer: i64, difficulty: Difficulty) -> i64 {
    let magnitude = answer.unsigned_abs();
    let mut offset: i64 = if magnitude < SMALL_ANSWER_THRESHOLD as u64 {
        rng.gen_range(1..=SMALL_ANSWER_MAX_OFFSET)
    } else {
        let percent = rng.gen_range(MIN_OFFSET_PERCENT..=MAX_OFFSET_PERCENT) as u128;
        let scaled = (u128::from(magnitude) * percent + 50) / 100;
        i64::try_from(scaled).unwrap_or(i64::MAX).max(1)
    };

    offset = match difficulty {
        // ×1.5
        Difficulty::Beginner | Difficulty::Easy => offset.saturating_add(offset / 2),
        Difficulty::Medium => offset,
        // ×0.7, at least 1
        Difficulty::Hard | Difficulty::Expert => (offset / 10 * 7 + offset % 10 * 7 / 10).max(1),
    };

    if rng.gen_bool(0.5) {
        answer.saturating_add(offset)
    } else {
        answer.saturating_sub(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn check(choices: &Choices, answer: i64) {
        let distinct: HashSet<i64> = choices.values.iter().copied().collect();
        assert_eq!(distinct.len(), 4, "{:?}", choices.values);
        assert_eq!(choices.correct(), answer);
        assert_eq!(choices.values.iter().filter(|&&v| v == answer).count(), 1);
        if answer >= 0 {
            assert!(choices.values.iter().all(|&v| v >= 0), "{:?}", choices.values);
        }
    }

    #[test]
    fn four_distinct_values_with_answer() {
        let mut rng = StdRng::seed_from_u64(10);
        for d in Difficulty::ALL {
            for answer in [0, 1, 2, 7, 19, 20, 144, 999, 3_628_800, -1, -7, -250] {
                let choices = generate_choices(&mut rng, answer, d);
                check(&choices, answer);
            }
        }
    }

    #[test]
    fn zero_answer_uses_positive_distractors() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let choices = generate_choices(&mut rng, 0, Difficulty::Expert);
            check(&choices, 0);
        }
    }

    #[test]
    fn extreme_answers_terminate() {
        let mut rng = StdRng::seed_from_u64(5);
        for answer in [i64::MAX, i64::MIN, i64::MAX - 1] {
            let choices = generate_choices(&mut rng, answer, Difficulty::Medium);
            check(&choices, answer);
        }
    }

    #[test]
    fn distractors_stay_near_large_answers() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            let choices = generate_choices(&mut rng, 1000, Difficulty::Medium);
            assert!(choices.values.iter().all(|&v| (700..=1300).contains(&v)), "{:?}", choices.values);
        }
    }

    #[test]
    fn correct_index_moves_around() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut positions = [0usize; 4];
        for _ in 0..400 {
            positions[generate_choices(&mut rng, 50, Difficulty::Easy).correct_index] += 1;
        }
        assert!(positions.iter().all(|&n| n > 0), "{positions:?}");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn choice_index_past_four_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        generate_choices(&mut rng, 12, Difficulty::Easy).choice(4);
    }
}

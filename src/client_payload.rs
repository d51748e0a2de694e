use serde_json::{json, Value};

use crate::drill_engine::{
    expr::Notation,
    models::{Choices, Question},
};

/// Input method string the client switches on.
fn input_mode(choices: Option<&Choices>) -> &'static str {
    match choices {
        Some(_) => "multiple_choice",
        None    => "typing",
    }
}

/// Build the `choices` block: one entry per slot with its 1-based hotkey.
fn choices_block(choices: &Choices) -> Value {
    let options: Vec<Value> = choices
        .values
        .iter()
        .enumerate()
        .map(|(i, &value)| json!({ "index": i, "hotkey": (i + 1).to_string(), "value": value }))
        .collect();
    json!({
        "options": options,
        "correct_index": choices.correct_index,
    })
}

/// Convert a question (and its multiple-choice options, if the session uses
/// them) into the JSON object the UI client renders.
///
/// `display` is the Unicode rendering, `ascii` the keyboard-friendly one;
/// `key` is the canonical dedup key and is stable across display changes.
pub fn question_payload(question: &Question, choices: Option<&Choices>) -> Value {
    let mut payload = json!({
        "label": question.label,
        "display": question.display,
        "ascii": question.expression.render(Notation::Ascii),
        "key": question.key,
        "answer": question.answer,
        "input_mode": input_mode(choices),
    });
    if let Some(choices) = choices {
        payload["choices"] = choices_block(choices);
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::{choices::generate_choices, models::Difficulty, Expr};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Question {
        let e = Expr::mul(Expr::paren(Expr::add(Expr::num(5), Expr::num(3))), Expr::num(2));
        Question::from_expr(e, "Mixed Basics")
    }

    #[test]
    fn typing_payload_has_no_choices() {
        let p = question_payload(&sample(), None);
        assert_eq!(p["label"], "Mixed Basics");
        assert_eq!(p["display"], "(5 + 3) × 2");
        assert_eq!(p["ascii"], "(5 + 3) * 2");
        assert_eq!(p["key"], "(* (+ 5 3) 2)");
        assert_eq!(p["answer"], 16);
        assert_eq!(p["input_mode"], "typing");
        assert!(p.get("choices").is_none());
    }

    #[test]
    fn multiple_choice_payload_lists_four_options() {
        let q = sample();
        let mut rng = StdRng::seed_from_u64(4);
        let choices = generate_choices(&mut rng, q.answer, Difficulty::Easy);
        let p = question_payload(&q, Some(&choices));

        assert_eq!(p["input_mode"], "multiple_choice");
        let options = p["choices"]["options"].as_array().unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0]["hotkey"], "1");
        let idx = p["choices"]["correct_index"].as_u64().unwrap() as usize;
        assert_eq!(options[idx]["value"], 16);
    }

    #[test]
    fn payload_round_trips_through_text() {
        let p = question_payload(&sample(), None);
        let text = serde_json::to_string(&p).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, p);
    }
}

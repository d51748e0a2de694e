//! Tour of all 16 operation families.
//!
//! Run with: `cargo run --example demo`
//! (set `RUST_LOG=debug` to watch pool refills and declined attempts)
//!
//! This example shows how `arith_drill_gen` works end to end:
//!
//! 1. **Every family × every tier** — one question each with fixed seeds,
//!    printed in Unicode and keyboard notation with its canonical key.
//! 2. **Session pool** — a few deduplicated questions from a pool opened by
//!    registry label.
//! 3. **Multiple choice** — four options for one question, plus the JSON
//!    payload a client would receive.

use arith_drill_gen::{
    client_payload::question_payload, generate_choices, generate_once, Difficulty, Notation,
    Operation, QuestionPool, Registry,
};
use rand::{rngs::StdRng, SeedableRng};

fn print_family(op: Operation) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {}  ({} / {})", op.label(), op.category(), op.mode_id());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (i, d) in Difficulty::ALL.into_iter().enumerate() {
        match generate_once(op, d, Some(100 + i as u64)) {
            Some(q) => println!(
                "  {:<9} {:<28} = {:<8} ascii: {:<28} key: {}",
                d.as_str(),
                q.display,
                q.answer,
                q.expression.render(Notation::Ascii),
                q.key,
            ),
            None => println!("  {:<9} (nothing generatable)", d.as_str()),
        }
    }
    println!();
}

fn main() {
    env_logger::init();

    for op in Operation::ALL {
        print_family(op);
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Session pool: Mixed Basics, Hard");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let Some(op) = Registry::shared().get("Mixed Basics") else {
        eprintln!("Mixed Basics is not registered");
        return;
    };
    let mut pool = QuestionPool::new(op, Difficulty::Hard, Some(7));
    for n in 1..=5 {
        if let Some(q) = pool.next() {
            println!("  {n}. {} = {}", q.display, q.answer);
        }
    }
    println!("  ({} left in batch, {} keys seen)", pool.remaining(), pool.seen_count());
    println!();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Multiple choice");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let Some(q) = generate_once(Operation::Percentage, Difficulty::Medium, Some(3)) else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(3);
    let choices = generate_choices(&mut rng, q.answer, Difficulty::Medium);
    println!("  Q: {}", q.display);
    for (i, value) in choices.values.iter().enumerate() {
        let marker = if choices.is_correct(i) { "✓" } else { " " };
        println!("  [{}] {marker} {value}", i + 1);
    }
    let wrong = choices.values[(choices.correct_index + 1) % 4];
    let result = q.check(wrong);
    println!("  Picking {wrong}: correct = {}, answer was {}", result.correct, result.correct_answer);
    println!();

    match serde_json::to_string_pretty(&question_payload(&q, Some(&choices))) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("payload serialisation failed: {e}"),
    }
}

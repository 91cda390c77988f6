//! End-to-end walk through a learner's quiz.
//!
//! Run with: `cargo run --example demo`
//! (set `RUST_LOG=debug` to see the generator's tracing output)
//!
//! 1. **Plan**: a built-in plan gives the "DSA" topic five subtopics.
//! 2. **Offer**: two subtopics are completed, so the test gets 20 questions
//!    drawn from the 100-question library.
//! 3. **Submit**: half the answers are correct; the book grades them.
//! 4. **Snapshot**: the progress snapshot the analysis model would receive.

use topic_quiz_gen::{
    predefined_plan, LearnerProfile, ProgressSnapshot, QuizPolicy, QuizRequest, SubmittedAnswer,
    SubtopicRow, SubtopicStatus, TestBook, TopicOutline,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // ── plan ────────────────────────────────────────────────────────────────
    let plan = predefined_plan("DSA").ok_or("no built-in plan for DSA")?;
    let topic = TopicOutline {
        id: "topic-dsa".into(),
        title: "DSA".into(),
        subtopics: plan
            .plan
            .subtopics
            .iter()
            .enumerate()
            .map(|(i, s)| SubtopicRow {
                id: format!("sub-{i}"),
                title: s.title.clone(),
                status: if i < 2 { SubtopicStatus::Completed } else { SubtopicStatus::Pending },
            })
            .collect(),
    };
    println!("Topic: {}", topic.title);
    for s in &topic.subtopics {
        println!("  [{:?}] {}", s.status, s.title);
    }
    for r in &plan.resources {
        println!("  resource: {} <{}>", r.title, r.url);
    }
    println!();

    // ── offer ───────────────────────────────────────────────────────────────
    let mut book = TestBook::with_seed(QuizPolicy::default(), 2024);
    let offered = book.offer(&QuizRequest::new("learner-1", "topic-dsa"), &topic)?;
    println!("Test {} with {} questions", offered.test_id, offered.questions.len());
    for q in offered.questions.iter().take(3) {
        println!("  {} {}", q.id, q.prompt);
        for option in &q.options {
            println!("      - {option}");
        }
    }
    println!();

    // ── submit ──────────────────────────────────────────────────────────────
    let record = book
        .get("learner-1", "topic-dsa")
        .ok_or("offered test missing from book")?;
    let answers: Vec<SubmittedAnswer> = record
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| SubmittedAnswer {
            question_id: q.id.clone(),
            answer: Some(if i % 2 == 0 {
                q.question.correct_answer.clone()
            } else {
                q.question.options[0].clone()
            }),
        })
        .collect();
    let report = book.submit("learner-1", &offered.test_id, &answers)?;
    println!("Score: {}/{}", report.score, report.max_score);
    println!();

    // ── snapshot ────────────────────────────────────────────────────────────
    let profile = LearnerProfile {
        full_name: Some("Sam".into()),
        ..Default::default()
    };
    let snapshot = ProgressSnapshot::collect(
        &profile,
        std::slice::from_ref(&topic),
        book.tests_for_user("learner-1"),
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

//! Small builders shared by the library generator and the test book.
//!
//! Seed keys are colon-joined strings.  Their exact shape is part of the
//! output contract: changing a key changes every question a user was shown.

use crate::quiz_engine::{
    models::{GeneratedQuestion, PublicQuestion, QuestionTemplate},
    seed::derive_seed,
    shuffle::shuffle,
};

/// Subtopic fallback used when a topic has no subtopics yet.
pub const WHOLE_TOPIC_KEY: &str = "topic";

/// `"{user}:{topic}:{subtopic}:{index}"`: keys both the case code and the
/// option order.
pub fn subtopic_key(user_id: &str, topic_title: &str, subtopic_title: &str, index: usize) -> String {
    format!("{user_id}:{topic_title}:{subtopic_title}:{index}")
}

/// `"{user}:{topic_id}:{subtopic_id | topic}:questions"`: keys the selection.
pub fn selection_key(user_id: &str, topic_id: &str, subtopic_id: Option<&str>) -> String {
    format!(
        "{user_id}:{topic_id}:{}:questions",
        subtopic_id.unwrap_or(WHOLE_TOPIC_KEY)
    )
}

/// First six hex digits of the seed, zero-padded on the left.
pub fn case_code(seed: u32) -> String {
    let hex = format!("{seed:06x}");
    hex[..6].to_string()
}

/// Shuffle a template's answers with `seed` and wrap them as a question.
pub fn question_from_template(template: QuestionTemplate, seed: u32) -> GeneratedQuestion {
    let options = shuffle(&template.answer_pool(), seed);
    GeneratedQuestion {
        prompt: template.prompt,
        options,
        correct_answer: template.correct_answer,
        explanation: None,
    }
}

/// Strip the answer key before a question leaves the server.
pub fn public_question(id: impl Into<String>, question: &GeneratedQuestion) -> PublicQuestion {
    PublicQuestion {
        id: id.into(),
        prompt: question.prompt.clone(),
        options: question.options.clone(),
    }
}

/// Case-insensitive, whitespace-trimmed form used to compare answers.
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

//! # topic_quiz_gen
//!
//! Deterministic quiz generation for a personal learning tracker.
//!
//! Learners split a topic into ordered subtopics and take one quiz per topic.
//! This crate builds those quizzes without any external service: a static
//! catalogue of study-skill questions is instantiated per subtopic, answer
//! options are shuffled with seeds derived from the user, topic and subtopic,
//! and a reproducible subset is selected for the test.
//!
//! ## How it works
//!
//! 1. [`build_question_library`] fills 20 templates per subtopic (or for the
//!    topic title itself when there are no subtopics).  Each subtopic gets a
//!    six-hex-digit case code and a scenario phrase from its seed.
//! 2. [`select_questions`] shuffles the whole library with a per-test seed and
//!    keeps the first `desired_count` questions.
//! 3. [`TestBook`] wraps both in the test lifecycle: one test per user and
//!    topic, graded once, skippable, regenerable with `force_new`.
//!
//! ## Key features
//!
//! - **Deterministic**: the same user, topic and subtopics always produce
//!   byte-for-byte the same questions and option order.
//! - **Model-friendly**: [`parse_model_reply`] validates chat-model JSON and
//!   [`questions_or_fallback`] drops back to the local library when a reply is
//!   unusable.
//!
//! ## Quick start
//!
//! ```rust
//! use topic_quiz_gen::{build_question_library, select_questions, QuizPolicy};
//!
//! let library = build_question_library(&["Arrays", "Graphs"], "u1", "DSA");
//! assert_eq!(library.len(), 40);
//!
//! let count = QuizPolicy::default().desired_count(false, 2);
//! let quiz = select_questions(&library, "u1", "topic-1", None, count);
//! for q in &quiz {
//!     assert!(q.options.contains(&q.correct_answer));
//! }
//! ```

pub mod error;
pub mod quiz_engine;

pub use error::{QuizError, Result};
pub use quiz_engine::{
    build_question_library, derive_seed, parse_model_reply, plan_quiz, predefined_plan,
    pseudo_random_stream, questions_or_fallback, select_questions, shuffle, GeneratedQuestion,
    GradeReport, LearnerProfile, OfferedTest, ProgressSnapshot, PublicQuestion, QuizPolicy,
    QuizRequest, ResourceList, SubmittedAnswer, SubtopicRow, SubtopicStatus, TestBook, TestRecord, TestStatus,
    TopicOutline,
};

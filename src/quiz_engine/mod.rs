//! Core quiz engine: seeding, library generation and the test lifecycle.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: questions, topics, test requests and reports |
//! | `seed`        | FNV-1a key hashing and the Mulberry32 stream |
//! | `shuffle`     | Seeded Fisher-Yates shuffle over a copy |
//! | `templates`   | Static 20-question catalogue and context phrases |
//! | `helpers`     | Seed keys, case codes, and question builders |
//! | `generator`   | `build_question_library()`, `select_questions()`, `plan_quiz()` |
//! | `policy`      | Question-count policy (configurable) |
//! | `test_book`   | One test per user and topic: offer, submit, skip |
//! | `progress`    | Snapshot fed to the progress-analysis model |
//! | `model_reply` | Parse and validate chat-model JSON, fall back to local questions |
//! | `topic_plans` | Built-in plans for well-known topics |

pub mod generator;
pub mod helpers;
pub mod model_reply;
pub mod models;
pub mod policy;
pub mod progress;
pub mod seed;
pub mod shuffle;
pub mod templates;
pub mod test_book;
pub mod topic_plans;

pub use generator::{build_question_library, plan_quiz, select_questions};
pub use model_reply::{
    parse_model_reply, questions_or_fallback, DoubtReply, GeneratedTest, ModelPayload,
    ProgressAnalysis, ResourceList, RiskLevel, TopicPlan,
};
pub use models::{
    GeneratedQuestion, GradeReport, OfferedTest, PublicQuestion, QuestionTemplate, QuizRequest,
    SubmittedAnswer, SubtopicRow, SubtopicStatus, TestStatus, TopicOutline,
};
pub use policy::QuizPolicy;
pub use progress::{LearnerProfile, ProgressSnapshot};
pub use seed::{derive_seed, pseudo_random_stream, Mulberry32};
pub use shuffle::shuffle;
pub use templates::{build_templates_for_subtopic, select_context};
pub use test_book::{TestBook, TestRecord};
pub use topic_plans::{predefined_plan, LearningResource, PredefinedPlan, ResourceKind};

use thiserror::Error;

/// Everything that can go wrong around quiz generation.
///
/// The generator itself is total; these variants come from the test lifecycle,
/// policy loading, and parsing of language-model replies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Topic not found: {topic_id}")]
    TopicNotFound { topic_id: String },

    #[error("Subtopic not found: {subtopic_id}")]
    SubtopicNotFound { subtopic_id: String },

    #[error("Test not found: {test_id}")]
    TestNotFound { test_id: String },

    #[error("Test already attempted for this topic")]
    AlreadyAttempted,

    #[error("Test was skipped for this topic")]
    TestSkipped,

    #[error("No JSON object found in model response")]
    NoJsonObject,

    #[error("Failed to parse model response: {0}")]
    MalformedReply(String),

    #[error("Model response failed validation: {0}")]
    InvalidReply(String),

    #[error("Invalid quiz policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;

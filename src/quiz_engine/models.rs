use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// One instantiated template: the prompt plus its canonical answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTemplate {
    pub prompt: String,
    pub correct_answer: String,
    pub distractors: [String; 3],
}

impl QuestionTemplate {
    /// Correct answer first, then the distractors in catalogue order.
    pub fn answer_pool(&self) -> Vec<String> {
        let mut pool = Vec::with_capacity(4);
        pool.push(self.correct_answer.clone());
        pool.extend(self.distractors.iter().cloned());
        pool
    }
}

/// A multiple-choice question ready to be stored for a test.
///
/// `correct_answer` always appears verbatim in `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

/// What the learner sees: no correct answer, no explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtopicStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicRow {
    pub id: String,
    pub title: String,
    pub status: SubtopicStatus,
}

/// A topic with its subtopics already sorted by their order index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOutline {
    pub id: String,
    pub title: String,
    pub subtopics: Vec<SubtopicRow>,
}

impl TopicOutline {
    pub fn completed_count(&self) -> usize {
        self.subtopics
            .iter()
            .filter(|s| s.status == SubtopicStatus::Completed)
            .count()
    }

    pub fn subtopic(&self, subtopic_id: &str) -> Option<&SubtopicRow> {
        self.subtopics.iter().find(|s| s.id == subtopic_id)
    }
}

// ---------------------------------------------------------------------------
// Tests (the quiz kind, one per user and topic)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Offered,
    Attempted,
    Skipped,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Offered   => write!(f, "offered"),
            TestStatus::Attempted => write!(f, "attempted"),
            TestStatus::Skipped   => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub user_id: String,
    pub topic_id: String,
    pub subtopic_id: Option<String>,
    #[serde(default)]
    pub force_new: bool,
}

impl QuizRequest {
    /// Whole-topic request without forcing a new test.
    pub fn new(user_id: impl Into<String>, topic_id: impl Into<String>) -> Self {
        QuizRequest {
            user_id: user_id.into(),
            topic_id: topic_id.into(),
            subtopic_id: None,
            force_new: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferedTest {
    pub test_id: String,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub score: u32,
    pub max_score: u32,
}

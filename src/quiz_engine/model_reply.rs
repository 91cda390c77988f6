//! Parsing and validating chat-model replies.
//!
//! Models are asked for bare JSON but sometimes wrap it in prose or code
//! fences, so a failed parse retries on the outermost `{ ... }` span.  Every
//! payload is validated before use; a test payload that fails either step
//! falls back to the local question library.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use tracing::warn;
use url::Url;

use crate::error::{QuizError, Result};
use crate::quiz_engine::models::GeneratedQuestion;
use crate::quiz_engine::topic_plans::LearningResource;

/// A reply shape with rules beyond what deserialization checks.
pub trait ModelPayload: DeserializeOwned {
    fn validate(&self) -> std::result::Result<(), String>;
}

/// Outermost `{ ... }` span: first opening brace to last closing brace.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_model_reply<T: ModelPayload>(text: &str) -> Result<T> {
    let payload: T = match serde_json::from_str(text) {
        Ok(parsed) => parsed,
        Err(_) => {
            let object = extract_json_object(text).ok_or(QuizError::NoJsonObject)?;
            serde_json::from_str(object).map_err(|e| QuizError::MalformedReply(e.to_string()))?
        }
    };
    payload.validate().map_err(QuizError::InvalidReply)?;
    Ok(payload)
}

fn min_chars(field: &str, value: &str, min: usize) -> std::result::Result<(), String> {
    if value.chars().count() < min {
        return Err(format!("{field} must be at least {min} characters"));
    }
    Ok(())
}

/// Optional string field that may be omitted but never `null`.
fn present_string<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<String>, D::Error> {
    String::deserialize(de).map(Some)
}

fn count_between(field: &str, len: usize, min: usize, max: usize) -> std::result::Result<(), String> {
    if len < min || len > max {
        return Err(format!("{field} must have between {min} and {max} entries (got {len})"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Generated test
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTest {
    pub questions: Vec<ModelQuestion>,
}

impl ModelPayload for GeneratedTest {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.questions.is_empty() {
            return Err("questions must not be empty".into());
        }
        for (i, q) in self.questions.iter().enumerate() {
            min_chars(&format!("questions[{i}].prompt"), &q.prompt, 5)?;
            if q.options.len() < 2 {
                return Err(format!("questions[{i}].options needs at least 2 entries"));
            }
            if q.options.iter().any(|o| o.is_empty()) {
                return Err(format!("questions[{i}].options must not contain empty strings"));
            }
            min_chars(&format!("questions[{i}].correctAnswer"), &q.correct_answer, 1)?;
        }
        Ok(())
    }
}

impl From<GeneratedTest> for Vec<GeneratedQuestion> {
    fn from(test: GeneratedTest) -> Self {
        test.questions
            .into_iter()
            .map(|q| GeneratedQuestion {
                prompt: q.prompt,
                options: q.options,
                correct_answer: q.correct_answer,
                explanation: q.explanation,
            })
            .collect()
    }
}

/// Use the model's questions when its reply is usable, otherwise the local
/// library built by `fallback`.
pub fn questions_or_fallback<F>(reply: Option<&str>, fallback: F) -> Vec<GeneratedQuestion>
where
    F: FnOnce() -> Vec<GeneratedQuestion>,
{
    let Some(text) = reply else {
        return fallback();
    };
    match parse_model_reply::<GeneratedTest>(text) {
        Ok(test) => test.into(),
        Err(e) => {
            warn!(error = %e, "model test unusable, using local question library");
            fallback()
        }
    }
}

// ---------------------------------------------------------------------------
// Topic plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSubtopic {
    pub title: String,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPlan {
    pub subtopics: Vec<PlannedSubtopic>,
}

impl ModelPayload for TopicPlan {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.subtopics.len() < 3 {
            return Err(format!("subtopics needs at least 3 entries (got {})", self.subtopics.len()));
        }
        for (i, s) in self.subtopics.iter().enumerate() {
            min_chars(&format!("subtopics[{i}].title"), &s.title, 2)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Resource list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    pub resources: Vec<LearningResource>,
}

impl ModelPayload for ResourceList {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.resources.len() < 2 {
            return Err(format!("resources needs at least 2 entries (got {})", self.resources.len()));
        }
        for (i, r) in self.resources.iter().enumerate() {
            min_chars(&format!("resources[{i}].title"), &r.title, 2)?;
            Url::parse(&r.url).map_err(|e| format!("resources[{i}].url is not a valid URL: {e}"))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Progress analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAnalysis {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub actions: Vec<String>,
    pub reminder: String,
}

impl ModelPayload for ProgressAnalysis {
    fn validate(&self) -> std::result::Result<(), String> {
        min_chars("summary", &self.summary, 10)?;
        count_between("actions", self.actions.len(), 2, 5)?;
        for (i, action) in self.actions.iter().enumerate() {
            min_chars(&format!("actions[{i}]"), action, 3)?;
        }
        min_chars("reminder", &self.reminder, 5)
    }
}

// ---------------------------------------------------------------------------
// Doubt reply
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtReply {
    pub answer: String,
    pub follow_ups: Vec<String>,
}

impl ModelPayload for DoubtReply {
    fn validate(&self) -> std::result::Result<(), String> {
        min_chars("answer", &self.answer, 5)?;
        count_between("followUps", self.follow_ups.len(), 1, 3)?;
        for (i, f) in self.follow_ups.iter().enumerate() {
            min_chars(&format!("followUps[{i}]"), f, 3)?;
        }
        Ok(())
    }
}

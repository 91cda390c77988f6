use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    models::{SubtopicStatus, TestStatus, TopicOutline},
    test_book::TestRecord,
};

const RECENT_TOPICS: usize = 5;

/// Profile fields the learner may or may not have filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub full_name: Option<String>,
    pub primary_skill: Option<String>,
    pub experience_level: Option<String>,
    pub learning_goal: Option<String>,
}

/// Input for the progress-analysis prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub full_name: String,
    pub primary_skill: String,
    pub experience_level: String,
    pub learning_goal: String,
    pub total_topics: usize,
    pub completed_subtopics: usize,
    pub pending_subtopics: usize,
    pub attempted_tests: usize,
    pub avg_score: f64,
    pub recent_topics: Vec<String>,
}

impl ProgressSnapshot {
    /// Summarise a learner's topics and tests.
    ///
    /// `avg_score` is the mean of `score / max_score` over attempted tests
    /// that have a score and a non-zero maximum, rounded to two decimals.
    pub fn collect<'a>(
        profile: &LearnerProfile,
        topics: &[TopicOutline],
        tests: impl IntoIterator<Item = &'a TestRecord>,
    ) -> Self {
        let (completed, pending) = topics
            .iter()
            .flat_map(|t| &t.subtopics)
            .fold((0, 0), |(done, open), s| match s.status {
                SubtopicStatus::Completed => (done + 1, open),
                SubtopicStatus::Pending => (done, open + 1),
            });

        let attempted: Vec<&TestRecord> = tests
            .into_iter()
            .filter(|t| t.status == TestStatus::Attempted)
            .collect();
        let ratios: Vec<f64> = attempted
            .iter()
            .filter_map(|t| match (t.score, t.max_score) {
                (Some(score), Some(max)) if max > 0 => Some(f64::from(score) / f64::from(max)),
                _ => None,
            })
            .collect();
        let avg_score = if ratios.is_empty() {
            0.0
        } else {
            let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        let or_default = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };

        ProgressSnapshot {
            full_name: or_default(&profile.full_name, "Learner"),
            primary_skill: or_default(&profile.primary_skill, "General"),
            experience_level: or_default(&profile.experience_level, "beginner"),
            learning_goal: or_default(&profile.learning_goal, "Improve skill depth"),
            total_topics: topics.len(),
            completed_subtopics: completed,
            pending_subtopics: pending,
            attempted_tests: attempted.len(),
            avg_score,
            recent_topics: topics.iter().take(RECENT_TOPICS).map(|t| t.title.clone()).collect(),
        }
    }
}

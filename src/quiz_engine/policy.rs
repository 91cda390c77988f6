use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// How many questions a test gets.
///
/// Loaded from JSON when a deployment wants different counts; any key left
/// out keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPolicy {
    /// Floor applied to every test.
    pub min_questions: usize,
    /// Count for a test that targets one subtopic.
    pub single_subtopic_questions: usize,
    /// Whole-topic tests grow by this much per completed subtopic.
    pub questions_per_completed_subtopic: usize,
}

impl Default for QuizPolicy {
    fn default() -> Self {
        QuizPolicy {
            min_questions: 20,
            single_subtopic_questions: 20,
            questions_per_completed_subtopic: 5,
        }
    }
}

impl QuizPolicy {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let policy: QuizPolicy =
            serde_json::from_str(raw).map_err(|e| QuizError::InvalidPolicy(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_questions", self.min_questions),
            ("single_subtopic_questions", self.single_subtopic_questions),
            ("questions_per_completed_subtopic", self.questions_per_completed_subtopic),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(QuizError::InvalidPolicy(format!("{name} must be at least 1"))),
            None => Ok(()),
        }
    }

    pub fn desired_count(&self, targets_single_subtopic: bool, completed_subtopics: usize) -> usize {
        let requested = if targets_single_subtopic {
            self.single_subtopic_questions
        } else {
            completed_subtopics
                .max(1)
                .saturating_mul(self.questions_per_completed_subtopic)
        };
        requested.max(self.min_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_counts() {
        let policy = QuizPolicy::default();
        assert_eq!(policy.desired_count(true, 0), 20);
        assert_eq!(policy.desired_count(true, 9), 20);
        assert_eq!(policy.desired_count(false, 0), 20);
        assert_eq!(policy.desired_count(false, 4), 20);
        assert_eq!(policy.desired_count(false, 5), 25);
        assert_eq!(policy.desired_count(false, 8), 40);
    }

    #[test]
    fn json_overrides_keep_missing_defaults() {
        let policy = QuizPolicy::from_json_str(r#"{ "min_questions": 10 }"#).unwrap();
        assert_eq!(policy.min_questions, 10);
        assert_eq!(policy.single_subtopic_questions, 20);
        assert_eq!(policy.desired_count(false, 3), 15);
    }

    #[test]
    fn zero_counts_are_rejected() {
        let err = QuizPolicy::from_json_str(r#"{ "questions_per_completed_subtopic": 0 }"#)
            .unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidPolicy("questions_per_completed_subtopic must be at least 1".into())
        );
    }

    #[test]
    fn huge_per_subtopic_count_saturates() {
        let policy =
            QuizPolicy::from_json_str(r#"{ "questions_per_completed_subtopic": 18446744073709551615 }"#)
                .unwrap();
        assert_eq!(policy.desired_count(false, 2), usize::MAX);
        assert_eq!(policy.desired_count(true, 2), 20);
    }

    #[test]
    fn malformed_json_is_a_policy_error() {
        let err = QuizPolicy::from_json_str("{ min_questions: ").unwrap_err();
        assert!(matches!(err, QuizError::InvalidPolicy(_)));
    }
}

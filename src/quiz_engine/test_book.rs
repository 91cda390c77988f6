//! In-memory record of every user's tests.
//!
//! A user gets at most one test per topic.  It starts `offered`, becomes
//! `attempted` after a single submission, or `skipped` if the user opts out.
//! `force_new` regenerates an existing test in place, keeping its id.

use std::collections::HashMap;

use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{QuizError, Result};
use crate::quiz_engine::{
    generator::plan_quiz,
    helpers::{normalize_answer, public_question},
    models::{
        GeneratedQuestion, GradeReport, OfferedTest, QuizRequest, SubmittedAnswer, TestStatus,
        TopicOutline,
    },
    policy::QuizPolicy,
};

/// A stored question plus the learner's graded answer, once submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuestion {
    pub id: String,
    #[serde(flatten)]
    pub question: GeneratedQuestion,
    pub user_answer: Option<String>,
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    pub test_id: String,
    pub user_id: String,
    pub topic_id: String,
    pub status: TestStatus,
    pub total_questions: usize,
    pub score: Option<u32>,
    pub max_score: Option<u32>,
    pub questions: Vec<StoredQuestion>,
}

impl TestRecord {
    fn offered_view(&self) -> OfferedTest {
        OfferedTest {
            test_id: self.test_id.clone(),
            questions: self
                .questions
                .iter()
                .map(|q| public_question(q.id.clone(), &q.question))
                .collect(),
        }
    }

    fn load_questions(&mut self, questions: Vec<GeneratedQuestion>) {
        self.questions = questions
            .into_iter()
            .enumerate()
            .map(|(i, question)| StoredQuestion {
                id: format!("{}-Q{:02}", self.test_id, i + 1),
                question,
                user_answer: None,
                is_correct: None,
            })
            .collect();
        self.total_questions = self.questions.len();
        self.status = TestStatus::Offered;
        self.score = None;
        self.max_score = None;
    }
}

type TestKey = (String, String);

/// All tests, keyed by `(user_id, topic_id)`.
pub struct TestBook {
    policy: QuizPolicy,
    tests: HashMap<TestKey, TestRecord>,
    ids: HashMap<String, TestKey>,
    rng: StdRng,
}

impl TestBook {
    pub fn new(policy: QuizPolicy) -> Self {
        Self::with_rng(policy, StdRng::from_entropy())
    }

    /// Reproducible test ids, for tests and demos.
    pub fn with_seed(policy: QuizPolicy, seed: u64) -> Self {
        Self::with_rng(policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(policy: QuizPolicy, rng: StdRng) -> Self {
        TestBook { policy, tests: HashMap::new(), ids: HashMap::new(), rng }
    }

    pub fn policy(&self) -> &QuizPolicy {
        &self.policy
    }

    pub fn get(&self, user_id: &str, topic_id: &str) -> Option<&TestRecord> {
        self.tests.get(&(user_id.to_string(), topic_id.to_string()))
    }

    pub fn tests_for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a TestRecord> + 'a {
        self.tests.values().filter(move |t| t.user_id == user_id)
    }

    fn mint_test_id(&mut self) -> String {
        loop {
            let id = format!("TQ-{:08X}", self.rng.next_u32());
            if !self.ids.contains_key(&id) {
                return id;
            }
        }
    }

    /// Offer a test for `topic`, reusing a pending one unless `force_new`.
    pub fn offer(&mut self, request: &QuizRequest, topic: &TopicOutline) -> Result<OfferedTest> {
        if request.topic_id != topic.id {
            return Err(QuizError::TopicNotFound { topic_id: request.topic_id.clone() });
        }

        let key = (request.user_id.clone(), request.topic_id.clone());
        if let Some(existing) = self.tests.get(&key) {
            if !request.force_new {
                match existing.status {
                    TestStatus::Attempted => return Err(QuizError::AlreadyAttempted),
                    TestStatus::Skipped => return Err(QuizError::TestSkipped),
                    TestStatus::Offered => {
                        info!(test_id = %existing.test_id, "reusing offered test");
                        return Ok(existing.offered_view());
                    }
                }
            }
        }

        let questions = plan_quiz(
            &self.policy,
            &request.user_id,
            topic,
            request.subtopic_id.as_deref(),
        )?;

        let existing_id = self.tests.get(&key).map(|r| r.test_id.clone());
        let test_id = match existing_id {
            Some(id) => id,
            None => self.mint_test_id(),
        };
        let record = self.tests.entry(key.clone()).or_insert_with(|| TestRecord {
            test_id: test_id.clone(),
            user_id: request.user_id.clone(),
            topic_id: request.topic_id.clone(),
            status: TestStatus::Offered,
            total_questions: 0,
            score: None,
            max_score: None,
            questions: Vec::new(),
        });
        record.load_questions(questions);
        self.ids.insert(test_id.clone(), key);

        info!(
            test_id = %test_id,
            topic_id = %request.topic_id,
            questions = record.total_questions,
            force_new = request.force_new,
            "offered test"
        );
        Ok(record.offered_view())
    }

    /// Grade the single allowed submission for `test_id`.
    ///
    /// Questions without an answer count as wrong.
    pub fn submit(
        &mut self,
        user_id: &str,
        test_id: &str,
        answers: &[SubmittedAnswer],
    ) -> Result<GradeReport> {
        let not_found = || QuizError::TestNotFound { test_id: test_id.to_string() };
        let key = self.ids.get(test_id).ok_or_else(not_found)?;
        let record = self
            .tests
            .get_mut(key)
            .filter(|r| r.user_id == user_id)
            .ok_or_else(not_found)?;

        match record.status {
            TestStatus::Attempted => return Err(QuizError::AlreadyAttempted),
            TestStatus::Skipped => return Err(QuizError::TestSkipped),
            TestStatus::Offered => {}
        }

        let by_question: HashMap<&str, &str> = answers
            .iter()
            .map(|a| (a.question_id.as_str(), a.answer.as_deref().unwrap_or("")))
            .collect();

        let mut score = 0u32;
        for stored in &mut record.questions {
            let answer = by_question.get(stored.id.as_str()).copied().unwrap_or("");
            let correct = normalize_answer(answer) == normalize_answer(&stored.question.correct_answer);
            if correct {
                score += 1;
            }
            stored.user_answer = Some(answer.to_string());
            stored.is_correct = Some(correct);
        }

        let max_score = u32::try_from(record.questions.len()).unwrap_or(u32::MAX);
        record.status = TestStatus::Attempted;
        record.score = Some(score);
        record.max_score = Some(max_score);

        info!(test_id = test_id, score = score, max_score = max_score, "graded test");
        Ok(GradeReport { score, max_score })
    }

    /// Mark the topic's test as skipped, creating the record if needed.
    pub fn skip(&mut self, user_id: &str, topic_id: &str) -> Result<()> {
        let key = (user_id.to_string(), topic_id.to_string());
        if let Some(existing) = self.tests.get(&key) {
            if existing.status == TestStatus::Attempted {
                return Err(QuizError::AlreadyAttempted);
            }
        }

        let existing_id = self.tests.get(&key).map(|r| r.test_id.clone());
        let test_id = match existing_id {
            Some(id) => id,
            None => self.mint_test_id(),
        };
        let record = self.tests.entry(key.clone()).or_insert_with(|| TestRecord {
            test_id: test_id.clone(),
            user_id: user_id.to_string(),
            topic_id: topic_id.to_string(),
            status: TestStatus::Skipped,
            total_questions: 0,
            score: None,
            max_score: None,
            questions: Vec::new(),
        });
        record.status = TestStatus::Skipped;
        record.total_questions = 0;
        record.questions.clear();
        self.ids.insert(test_id.clone(), key);

        info!(test_id = %test_id, topic_id = topic_id, "skipped test");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::models::{SubtopicRow, SubtopicStatus};

    fn topic() -> TopicOutline {
        TopicOutline {
            id: "t1".into(),
            title: "React".into(),
            subtopics: ["Components and JSX", "State and Props", "Hooks"]
                .iter()
                .enumerate()
                .map(|(i, title)| SubtopicRow {
                    id: format!("s{i}"),
                    title: title.to_string(),
                    status: SubtopicStatus::Completed,
                })
                .collect(),
        }
    }

    fn book() -> TestBook {
        TestBook::with_seed(QuizPolicy::default(), 7)
    }

    fn answers_for(book: &TestBook, user: &str, topic_id: &str, correct: usize) -> Vec<SubmittedAnswer> {
        let record = book.get(user, topic_id).unwrap();
        record
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| SubmittedAnswer {
                question_id: q.id.clone(),
                answer: Some(if i < correct {
                    format!("  {}  ", q.question.correct_answer.to_uppercase())
                } else {
                    "no idea".to_string()
                }),
            })
            .collect()
    }

    #[test]
    fn offer_hides_the_answer_key() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        assert_eq!(offered.questions.len(), 20);
        let json = serde_json::to_string(&offered).unwrap();
        assert!(!json.contains("correctAnswer"));
        assert!(json.contains("testId"));
    }

    #[test]
    fn pending_offer_is_reused() {
        let mut book = book();
        let first = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        let second = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn submission_is_graded_case_insensitively() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        let answers = answers_for(&book, "u1", "t1", 12);
        let report = book.submit("u1", &offered.test_id, &answers).unwrap();
        assert_eq!(report, GradeReport { score: 12, max_score: 20 });

        let record = book.get("u1", "t1").unwrap();
        assert_eq!(record.status, TestStatus::Attempted);
        assert_eq!(record.score, Some(12));
        assert!(record.questions.iter().all(|q| q.is_correct.is_some()));
    }

    #[test]
    fn missing_answers_count_as_wrong() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        let report = book.submit("u1", &offered.test_id, &[]).unwrap();
        assert_eq!(report, GradeReport { score: 0, max_score: 20 });
        let record = book.get("u1", "t1").unwrap();
        assert_eq!(record.questions[0].user_answer.as_deref(), Some(""));
    }

    #[test]
    fn second_submission_is_rejected() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        book.submit("u1", &offered.test_id, &[]).unwrap();
        let err = book.submit("u1", &offered.test_id, &[]).unwrap_err();
        assert_eq!(err, QuizError::AlreadyAttempted);
        let err = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap_err();
        assert_eq!(err, QuizError::AlreadyAttempted);
    }

    #[test]
    fn force_new_resets_in_place() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        book.submit("u1", &offered.test_id, &[]).unwrap();

        let mut request = QuizRequest::new("u1", "t1");
        request.force_new = true;
        let again = book.offer(&request, &topic()).unwrap();
        assert_eq!(again.test_id, offered.test_id);

        let record = book.get("u1", "t1").unwrap();
        assert_eq!(record.status, TestStatus::Offered);
        assert_eq!(record.score, None);
        assert!(record.questions.iter().all(|q| q.user_answer.is_none()));
    }

    #[test]
    fn other_users_cannot_submit() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        let err = book.submit("u2", &offered.test_id, &[]).unwrap_err();
        assert_eq!(err, QuizError::TestNotFound { test_id: offered.test_id.clone() });
    }

    #[test]
    fn skip_blocks_offers_until_forced() {
        let mut book = book();
        book.skip("u1", "t1").unwrap();
        let err = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap_err();
        assert_eq!(err, QuizError::TestSkipped);

        let mut request = QuizRequest::new("u1", "t1");
        request.force_new = true;
        assert_eq!(book.offer(&request, &topic()).unwrap().questions.len(), 20);
    }

    #[test]
    fn skipped_pending_test_cannot_be_submitted() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        book.skip("u1", "t1").unwrap();
        let err = book.submit("u1", &offered.test_id, &[]).unwrap_err();
        assert_eq!(err, QuizError::TestSkipped);
        assert_eq!(book.get("u1", "t1").unwrap().total_questions, 0);
    }

    #[test]
    fn attempted_test_cannot_be_skipped() {
        let mut book = book();
        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        book.submit("u1", &offered.test_id, &[]).unwrap();
        assert_eq!(book.skip("u1", "t1").unwrap_err(), QuizError::AlreadyAttempted);
    }

    #[test]
    fn mismatched_topic_is_not_found() {
        let mut book = book();
        let err = book.offer(&QuizRequest::new("u1", "t9"), &topic()).unwrap_err();
        assert_eq!(err, QuizError::TopicNotFound { topic_id: "t9".into() });
    }

    #[test]
    fn offers_follow_the_configured_policy() {
        let policy = QuizPolicy { questions_per_completed_subtopic: 12, ..QuizPolicy::default() };
        let mut book = TestBook::with_seed(policy, 7);
        assert_eq!(book.policy(), &policy);

        let offered = book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        let expected = book.policy().desired_count(false, topic().completed_count());
        assert_eq!(expected, 36);
        assert_eq!(offered.questions.len(), expected);

        let report = book.submit("u1", &offered.test_id, &[]).unwrap();
        assert_eq!(report.max_score, 36);
    }

    #[test]
    fn tests_are_listed_per_user() {
        let mut book = book();
        book.offer(&QuizRequest::new("u1", "t1"), &topic()).unwrap();
        book.offer(&QuizRequest::new("u2", "t1"), &topic()).unwrap();
        book.skip("u1", "t2").unwrap();
        assert_eq!(book.tests_for_user("u1").count(), 2);
        assert_eq!(book.tests_for_user("u2").count(), 1);
    }
}

use tracing::debug;

use crate::error::{QuizError, Result};
use crate::quiz_engine::{
    helpers::{case_code, question_from_template, selection_key, subtopic_key},
    models::{GeneratedQuestion, TopicOutline},
    policy::QuizPolicy,
    seed::derive_seed,
    shuffle::shuffle,
    templates::{build_templates_for_subtopic, select_context},
};

/// Build every question for every subtopic, in subtopic then template order.
///
/// With no subtopics the topic title stands in for a single subtopic.
pub fn build_question_library<S: AsRef<str>>(
    subtopic_titles: &[S],
    user_id: &str,
    topic_title: &str,
) -> Vec<GeneratedQuestion> {
    let titles: Vec<&str> = if subtopic_titles.is_empty() {
        vec![topic_title]
    } else {
        subtopic_titles.iter().map(AsRef::as_ref).collect()
    };

    let mut library = Vec::new();
    for (index, subtopic) in titles.iter().enumerate() {
        let case_seed = derive_seed(&subtopic_key(user_id, topic_title, subtopic, index));
        let code = case_code(case_seed);
        let context = select_context(case_seed);

        // Option order is keyed by template position only; the subtopic title
        // in the key is what separates subtopics.
        let templates = build_templates_for_subtopic(subtopic, &code, context);
        library.extend(templates.into_iter().enumerate().map(|(template_index, template)| {
            let seed = derive_seed(&subtopic_key(user_id, topic_title, subtopic, template_index));
            question_from_template(template, seed)
        }));
    }

    debug!(
        topic = topic_title,
        subtopics = titles.len(),
        questions = library.len(),
        "built question library"
    );
    library
}

/// Reproducibly shuffle the library and keep the first `desired_count`.
pub fn select_questions(
    library: &[GeneratedQuestion],
    user_id: &str,
    topic_id: &str,
    subtopic_id: Option<&str>,
    desired_count: usize,
) -> Vec<GeneratedQuestion> {
    let pick_seed = derive_seed(&selection_key(user_id, topic_id, subtopic_id));
    let mut picked = shuffle(library, pick_seed);
    picked.truncate(desired_count);

    debug!(topic_id = topic_id, library = library.len(), selected = picked.len(), "selected questions");
    picked
}

/// Choose the questions for a new test on `topic`.
///
/// A `subtopic_id` narrows the library to that one subtopic; it must belong
/// to the topic.
pub fn plan_quiz(
    policy: &QuizPolicy,
    user_id: &str,
    topic: &TopicOutline,
    subtopic_id: Option<&str>,
) -> Result<Vec<GeneratedQuestion>> {
    let titles: Vec<&str> = match subtopic_id {
        Some(id) => {
            let selected = topic.subtopic(id).ok_or_else(|| QuizError::SubtopicNotFound {
                subtopic_id: id.to_string(),
            })?;
            vec![selected.title.as_str()]
        }
        None => topic.subtopics.iter().map(|s| s.title.as_str()).collect(),
    };

    let desired = policy.desired_count(subtopic_id.is_some(), topic.completed_count());
    let library = build_question_library(&titles, user_id, &topic.title);
    Ok(select_questions(&library, user_id, &topic.id, subtopic_id, desired))
}

//! Static question catalogue.
//!
//! Each pattern is generic study-skill advice with three placeholders:
//! `{subtopic}`, `{context}` and `{case}`.  Only the substitution is dynamic.

use crate::quiz_engine::models::QuestionTemplate;

/// Scenario phrases woven into some prompts, indexed by `seed % 8`.
pub const CONTEXTS: [&str; 8] = [
    "a startup team",
    "a learning sprint",
    "a hackathon",
    "a product launch",
    "a study group",
    "a freelance project",
    "an interview prep track",
    "a mentorship session",
];

struct Pattern {
    prompt: &'static str,
    correct: &'static str,
    distractors: [&'static str; 3],
}

pub const TEMPLATES_PER_SUBTOPIC: usize = 20;

const PATTERNS: [Pattern; TEMPLATES_PER_SUBTOPIC] = [
    Pattern {
        prompt: "What is the primary goal of \"{subtopic}\" in {context}? (Case {case})",
        correct: "Apply {subtopic} to solve its core task efficiently.",
        distractors: [
            "Avoid using {subtopic} entirely.",
            "Use {subtopic} only for visual design.",
            "Use {subtopic} only for database backups.",
        ],
    },
    Pattern {
        prompt: "Which practice improves mastery of \"{subtopic}\"? (Case {case})",
        correct: "Work through progressively harder problems and review mistakes.",
        distractors: [
            "Memorize solutions without understanding.",
            "Skip problem-solving and only read summaries.",
            "Avoid revisiting errors.",
        ],
    },
    Pattern {
        prompt: "In {context}, what is a common pitfall when learning \"{subtopic}\"? (Case {case})",
        correct: "Rushing through concepts without validating understanding.",
        distractors: [
            "Using too many color themes.",
            "Adding more hardware.",
            "Ignoring basic math entirely.",
        ],
    },
    Pattern {
        prompt: "Which outcome best shows understanding of \"{subtopic}\"? (Case {case})",
        correct: "You can explain {subtopic} and apply it to new problems.",
        distractors: [
            "You can recall a definition but not apply it.",
            "You only solved one example once.",
            "You avoid questions involving edge cases.",
        ],
    },
    Pattern {
        prompt: "When should you use \"{subtopic}\"? (Case {case})",
        correct: "When it offers the most direct or efficient approach for the task.",
        distractors: [
            "Only when the problem is already solved.",
            "Only if the solution is provided.",
            "Only for UI animations.",
        ],
    },
    Pattern {
        prompt: "Which step helps verify your \"{subtopic}\" solution? (Case {case})",
        correct: "Test with edge cases and explain the logic step-by-step.",
        distractors: [
            "Remove comments and skip tests.",
            "Assume it works for all inputs.",
            "Only test the happy path.",
        ],
    },
    Pattern {
        prompt: "What is a good way to decompose \"{subtopic}\" problems? (Case {case})",
        correct: "Break the task into smaller, solvable steps.",
        distractors: [
            "Jump directly to optimization before correctness.",
            "Avoid writing down assumptions.",
            "Ignore input constraints.",
        ],
    },
    Pattern {
        prompt: "Which signal suggests you should revisit \"{subtopic}\" fundamentals? (Case {case})",
        correct: "You struggle to explain why your approach works.",
        distractors: [
            "You can recite a definition without examples.",
            "You only use pre-written solutions.",
            "You avoid discussing time tradeoffs.",
        ],
    },
    Pattern {
        prompt: "What helps retain \"{subtopic}\" knowledge over time? (Case {case})",
        correct: "Spaced repetition with small practice sets.",
        distractors: [
            "One long cram session only.",
            "Avoiding real problems.",
            "Never reviewing solved work.",
        ],
    },
    Pattern {
        prompt: "Which is the best next step after learning \"{subtopic}\" basics? (Case {case})",
        correct: "Solve applied problems that require adapting the core idea.",
        distractors: [
            "Stop practicing and move on immediately.",
            "Only watch more videos.",
            "Skip exercises entirely.",
        ],
    },
    Pattern {
        prompt: "How do you measure progress in \"{subtopic}\"? (Case {case})",
        correct: "By solving increasingly varied problems without hints.",
        distractors: [
            "By the number of pages read.",
            "By the number of videos watched.",
            "By how fast you skim notes.",
        ],
    },
    Pattern {
        prompt: "Which approach improves accuracy with \"{subtopic}\"? (Case {case})",
        correct: "Slow down to verify assumptions before coding.",
        distractors: [
            "Skip planning and code immediately.",
            "Copy solutions without reading.",
            "Never check constraints.",
        ],
    },
    Pattern {
        prompt: "What is a reliable way to debug \"{subtopic}\" solutions? (Case {case})",
        correct: "Trace with small inputs and check each step.",
        distractors: [
            "Guess until it passes.",
            "Only run on large inputs.",
            "Remove validation logic.",
        ],
    },
    Pattern {
        prompt: "Which statement best reflects good \"{subtopic}\" hygiene? (Case {case})",
        correct: "Document assumptions and handle edge cases.",
        distractors: [
            "Ignore edge cases to save time.",
            "Focus only on speed and skip correctness.",
            "Avoid naming variables clearly.",
        ],
    },
    Pattern {
        prompt: "How should you prioritize practice for \"{subtopic}\"? (Case {case})",
        correct: "Start with fundamentals, then increase difficulty.",
        distractors: [
            "Start with the hardest problems.",
            "Only review solutions.",
            "Skip the fundamentals entirely.",
        ],
    },
    Pattern {
        prompt: "Which behavior slows improvement in \"{subtopic}\"? (Case {case})",
        correct: "Repeating the same easy problem without variation.",
        distractors: [
            "Reviewing mistakes.",
            "Trying different approaches.",
            "Explaining solutions aloud.",
        ],
    },
    Pattern {
        prompt: "In {context}, what is the best way to explain \"{subtopic}\" to a peer? (Case {case})",
        correct: "Describe the idea, a simple example, and why it works.",
        distractors: [
            "List only final answers.",
            "Skip the reasoning.",
            "Avoid any example.",
        ],
    },
    Pattern {
        prompt: "Which signal shows you're ready to advance beyond \"{subtopic}\" basics? (Case {case})",
        correct: "You can solve variations without external hints.",
        distractors: [
            "You can repeat a definition.",
            "You only solve guided examples.",
            "You avoid new problems.",
        ],
    },
    Pattern {
        prompt: "What is the role of constraints when working with \"{subtopic}\"? (Case {case})",
        correct: "They shape the right approach and complexity choices.",
        distractors: [
            "They are optional details.",
            "They only matter after coding.",
            "They should be ignored for speed.",
        ],
    },
    Pattern {
        prompt: "Which habit keeps \"{subtopic}\" skills sharp? (Case {case})",
        correct: "Frequent short practice sessions with feedback.",
        distractors: [
            "Long breaks between practice.",
            "Only reading theory.",
            "Avoiding any review.",
        ],
    },
];

/// Pick the scenario phrase for a case seed.
pub fn select_context(seed: u32) -> &'static str {
    CONTEXTS[seed as usize % CONTEXTS.len()]
}

/// Fill one pattern. `{subtopic}` goes last so a title that happens to
/// contain `{case}` or `{context}` is inserted verbatim.
fn fill(pattern: &str, subtopic: &str, case_code: &str, context: &str) -> String {
    pattern
        .replace("{context}", context)
        .replace("{case}", case_code)
        .replace("{subtopic}", subtopic)
}

/// Instantiate the whole catalogue for one subtopic, in catalogue order.
pub fn build_templates_for_subtopic(
    subtopic_title: &str,
    case_code: &str,
    context: &str,
) -> Vec<QuestionTemplate> {
    PATTERNS
        .iter()
        .map(|p| QuestionTemplate {
            prompt: fill(p.prompt, subtopic_title, case_code, context),
            correct_answer: fill(p.correct, subtopic_title, case_code, context),
            distractors: p
                .distractors
                .map(|d| fill(d, subtopic_title, case_code, context)),
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::quiz_engine::model_reply::{PlannedSubtopic, TopicPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Youtube,
    Web,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

/// A built-in plan: ordered subtopics plus a starter reading list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedPlan {
    pub plan: TopicPlan,
    pub resources: Vec<LearningResource>,
}

type Entry = (&'static str, &'static str);
type Link = (&'static str, &'static str, ResourceKind);

const DSA_SUBTOPICS: [Entry; 5] = [
    ("Arrays and Strings", "Master indexing, traversal, and two-pointer techniques."),
    ("Linked Lists and Stacks", "Implement common operations and analyze time complexity."),
    ("Trees and BST", "Practice traversals and recursive problem solving."),
    ("Graphs", "Learn BFS, DFS, and shortest-path basics."),
    ("Dynamic Programming", "Use state transition and memoization patterns."),
];

const DSA_RESOURCES: [Link; 3] = [
    ("NeetCode DSA Roadmap", "https://neetcode.io/roadmap", ResourceKind::Web),
    (
        "Abdul Bari Data Structures Playlist",
        "https://www.youtube.com/results?search_query=abdul+bari+data+structures",
        ResourceKind::Youtube,
    ),
    ("LeetCode Practice", "https://leetcode.com/problemset/", ResourceKind::Web),
];

const REACT_SUBTOPICS: [Entry; 5] = [
    ("Components and JSX", "Build reusable UI units and understand render flow."),
    ("State and Props", "Model data flow and component communication."),
    ("Hooks", "Use useState, useEffect, and custom hooks correctly."),
    ("Routing and Forms", "Manage navigation and controlled forms."),
    ("Performance and Patterns", "Apply memoization, splitting, and clean architecture."),
];

const REACT_RESOURCES: [Link; 3] = [
    ("React Official Docs", "https://react.dev", ResourceKind::Web),
    (
        "React Full Course",
        "https://www.youtube.com/results?search_query=react+full+course",
        ResourceKind::Youtube,
    ),
    ("Frontend Mentor", "https://www.frontendmentor.io/challenges", ResourceKind::Web),
];

const PYTHON_SUBTOPICS: [Entry; 5] = [
    ("Python Syntax and Data Types", "Use Python syntax, collections, and built-ins efficiently."),
    ("Functions and Modules", "Design reusable functions and organize code in modules."),
    ("File Handling and Exceptions", "Read/write files and handle runtime errors cleanly."),
    ("Object-Oriented Python", "Build classes and apply inheritance and encapsulation."),
    ("Projects and Automation", "Build scripts and automate repetitive tasks."),
];

const PYTHON_RESOURCES: [Link; 3] = [
    ("Python Docs", "https://docs.python.org/3/", ResourceKind::Web),
    (
        "Python for Beginners",
        "https://www.youtube.com/results?search_query=python+for+beginners",
        ResourceKind::Youtube,
    ),
    ("Exercism Python Track", "https://exercism.org/tracks/python", ResourceKind::Web),
];

fn build(subtopics: &[Entry], resources: &[Link]) -> PredefinedPlan {
    PredefinedPlan {
        plan: TopicPlan {
            subtopics: subtopics
                .iter()
                .map(|(title, description)| PlannedSubtopic {
                    title: title.to_string(),
                    description: Some(description.to_string()),
                })
                .collect(),
        },
        resources: resources
            .iter()
            .map(|(title, url, kind)| LearningResource {
                title: title.to_string(),
                url: url.to_string(),
                kind: *kind,
            })
            .collect(),
    }
}

/// Built-in plan for well-known topics; `None` means ask the model.
pub fn predefined_plan(topic: &str) -> Option<PredefinedPlan> {
    let t = topic.to_lowercase();
    if t.contains("dsa") || (t.contains("data") && t.contains("structure")) {
        Some(build(&DSA_SUBTOPICS, &DSA_RESOURCES))
    } else if t.contains("react") {
        Some(build(&REACT_SUBTOPICS, &REACT_RESOURCES))
    } else if t.contains("python") {
        Some(build(&PYTHON_SUBTOPICS, &PYTHON_RESOURCES))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::model_reply::ModelPayload;

    #[test]
    fn matches_known_topics_case_insensitively() {
        assert!(predefined_plan("Intro to DSA").is_some());
        assert!(predefined_plan("Data Structures").is_some());
        assert!(predefined_plan("REACT hooks deep dive").is_some());
        assert!(predefined_plan("python").is_some());
        assert!(predefined_plan("Data Engineering").is_none());
        assert!(predefined_plan("Rust").is_none());
    }

    #[test]
    fn predefined_plans_pass_model_validation() {
        for topic in ["dsa", "react", "python"] {
            let plan = predefined_plan(topic).unwrap();
            assert!(plan.plan.validate().is_ok(), "{topic}");
            assert_eq!(plan.plan.subtopics.len(), 5);
            assert_eq!(plan.resources.len(), 3);
        }
    }

    #[test]
    fn resource_kind_serializes_as_type() {
        let plan = predefined_plan("react").unwrap();
        let json = serde_json::to_value(&plan.resources[1]).unwrap();
        assert_eq!(json["type"], "youtube");
    }
}

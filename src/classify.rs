//! Lexical classification of edge labels.
//!
//! A label is split into lowercase alphanumeric words. The positive vocabulary
//! is checked before the negative one, so a label carrying both (for example
//! "Not interested") is `Positive`.

use crate::flow::Edge;
use serde::{Deserialize, Serialize};

/// The semantic meaning of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Visual weight of an edge line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub dashed: bool,
}

impl Category {
    pub fn stroke(self) -> Stroke {
        match self {
            Category::Positive => Stroke {
                width: 2.5,
                dashed: false,
            },
            Category::Negative => Stroke {
                width: 2.0,
                dashed: true,
            },
            Category::Neutral => Stroke {
                width: 1.5,
                dashed: false,
            },
        }
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "ok",
    "okay",
    "sure",
    "true",
    "correct",
    "interested",
    "agree",
    "agreed",
    "accept",
    "accepted",
    "approved",
    "eligible",
    "available",
    "booked",
    "complete",
    "completed",
    "done",
];
const POSITIVE_STEMS: &[&str] = &["qualif", "success", "valid", "select", "confirm"];

const NEGATIVE_WORDS: &[&str] = &[
    "no",
    "nope",
    "not",
    "none",
    "never",
    "false",
    "wrong",
    "busy",
    "decline",
    "declined",
    "refuse",
    "refused",
    "denied",
    "unavailable",
    "ineligible",
    "missing",
    "absent",
    "cancel",
    "cancelled",
];
const NEGATIVE_STEMS: &[&str] = &["fail", "reject", "invalid", "unqualif", "disqualif", "declin"];

/// Classifies an edge by its label.
pub fn classify(edge: &Edge) -> Category {
    classify_label(edge.label.as_deref())
}

/// Classifies a bare label. `None` and blank labels are `Neutral`.
pub fn classify_label(label: Option<&str>) -> Category {
    let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
        return Category::Neutral;
    };
    let lowered = label.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if words
        .iter()
        .any(|w| matches_vocabulary(w, POSITIVE_WORDS, POSITIVE_STEMS))
    {
        Category::Positive
    } else if words
        .iter()
        .any(|w| matches_vocabulary(w, NEGATIVE_WORDS, NEGATIVE_STEMS))
    {
        Category::Negative
    } else {
        Category::Neutral
    }
}

fn matches_vocabulary(word: &str, words: &[&str], stems: &[&str]) -> bool {
    words.contains(&word) || stems.iter().any(|stem| word.starts_with(stem))
}

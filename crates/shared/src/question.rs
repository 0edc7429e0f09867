//! Assessment questions

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

/// A single value or a list of accepted values in a `showIf` predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Check whether `value` satisfies this condition
    pub fn contains(&self, value: &str) -> bool {
        match self {
            OneOrMany::One(v) => v == value,
            OneOrMany::Many(vs) => vs.iter().any(|v| v == value),
        }
    }
}

/// Conditional visibility: question/field id -> accepted value(s)
pub type ShowIf = BTreeMap<String, OneOrMany>;

/// An assessment question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ShowIf>,
}

impl Question {
    /// Evaluate `showIf` against the answers given so far.
    ///
    /// Every referenced field must be answered with an accepted value.
    /// A question without `showIf` is always visible.
    pub fn is_visible(&self, answers: &HashMap<String, String>) -> bool {
        match &self.show_if {
            None => true,
            Some(conditions) => conditions.iter().all(|(field, accepted)| {
                answers
                    .get(field)
                    .map(|answer| accepted.contains(answer))
                    .unwrap_or(false)
            }),
        }
    }

    /// Ids of the questions this question's visibility depends on
    pub fn depends_on(&self) -> Vec<&str> {
        self.show_if
            .as_ref()
            .map(|c| c.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }
}

/// A named group of questions as stored in `assessment-questions.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

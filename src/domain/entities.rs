//! Domain entities: core data structures

use std::fmt;

use crate::domain::tree::DecisionTree;

/// Terminal classification revealed at the end of a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Classification name, e.g. "日本仏教徒"
    pub label: String,
    /// Free-form explanation, may contain line breaks
    pub description: String,
}

impl Classification {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Target of a question's yes/no edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// Continue with the question at this index
    Question(usize),
    /// Stop: the traversal ends with this classification
    Result(Classification),
}

/// Internal decision node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub on_yes: NodeRef,
    pub on_no: NodeRef,
}

impl Question {
    pub fn new(prompt: impl Into<String>, on_yes: NodeRef, on_no: NodeRef) -> Self {
        Self {
            prompt: prompt.into(),
            on_yes,
            on_no,
        }
    }

    /// Both edges, yes first.
    pub fn edges(&self) -> [&NodeRef; 2] {
        [&self.on_yes, &self.on_no]
    }
}

/// A decision tree together with the heading shown above it.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    pub title: String,
    pub tagline: Option<String>,
    pub tree: DecisionTree,
}

impl Questionnaire {
    pub fn new(title: impl Into<String>, tagline: Option<String>, tree: DecisionTree) -> Self {
        Self {
            title: title.into(),
            tagline,
            tree,
        }
    }
}

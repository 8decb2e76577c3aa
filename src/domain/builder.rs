//! Tree builder: turns an authored tree document into a questionnaire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::entities::{Classification, NodeRef, Question, Questionnaire};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::DecisionTree;

/// Result type for tree construction.
pub type TreeResult<T> = Result<T, DomainError>;

/// Authored form of a questionnaire, as found in a tree file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeDocument {
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    /// Named classifications, referenced from question edges by key
    #[serde(default)]
    pub results: BTreeMap<String, ResultSpec>,
    pub questions: Vec<QuestionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultSpec {
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSpec {
    pub prompt: String,
    pub yes: EdgeSpec,
    pub no: EdgeSpec,
}

/// Edge as written: a question index or a result key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EdgeSpec {
    Question(usize),
    Result(String),
}

/// Resolves result keys and assembles the [`DecisionTree`].
pub struct TreeBuilder {
    results: BTreeMap<String, Classification>,
}

impl TreeBuilder {
    #[instrument(level = "debug", skip(document), fields(title = %document.title))]
    pub fn build(document: &TreeDocument) -> TreeResult<Questionnaire> {
        let builder = Self {
            results: document
                .results
                .iter()
                .map(|(key, spec)| {
                    (
                        key.clone(),
                        Classification::new(spec.label.clone(), spec.description.clone()),
                    )
                })
                .collect(),
        };

        let questions = document
            .questions
            .iter()
            .enumerate()
            .map(|(idx, spec)| builder.question(idx, spec))
            .collect::<TreeResult<Vec<_>>>()?;
        debug!(
            "built {} questions, {} results",
            questions.len(),
            builder.results.len()
        );

        let tree = DecisionTree::new(questions)?;
        Ok(Questionnaire::new(
            document.title.clone(),
            document.tagline.clone(),
            tree,
        ))
    }

    fn question(&self, idx: usize, spec: &QuestionSpec) -> DomainResult<Question> {
        Ok(Question::new(
            spec.prompt.clone(),
            self.edge(idx, &spec.yes)?,
            self.edge(idx, &spec.no)?,
        ))
    }

    fn edge(&self, idx: usize, spec: &EdgeSpec) -> DomainResult<NodeRef> {
        match spec {
            EdgeSpec::Question(target) => Ok(NodeRef::Question(*target)),
            EdgeSpec::Result(key) => self
                .results
                .get(key)
                .cloned()
                .map(NodeRef::Result)
                .ok_or_else(|| DomainError::UnknownResult {
                    question: idx,
                    key: key.clone(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(questions: Vec<QuestionSpec>) -> TreeDocument {
        let mut results = BTreeMap::new();
        results.insert(
            "cat".to_string(),
            ResultSpec {
                label: "Cat person".to_string(),
                description: "Quiet\nindependent".to_string(),
            },
        );
        TreeDocument {
            title: "Pets".to_string(),
            tagline: None,
            results,
            questions,
        }
    }

    #[test]
    fn given_result_key_when_building_then_edge_is_inline_classification() {
        let doc = document(vec![QuestionSpec {
            prompt: "Likes naps?".to_string(),
            yes: EdgeSpec::Result("cat".to_string()),
            no: EdgeSpec::Question(0),
        }]);

        let questionnaire = TreeBuilder::build(&doc).unwrap();
        let question = questionnaire.tree.question(0).unwrap();

        match &question.on_yes {
            NodeRef::Result(c) => {
                assert_eq!(c.label, "Cat person");
                assert_eq!(c.description, "Quiet\nindependent");
            }
            other => panic!("expected result edge, got {:?}", other),
        }
        assert_eq!(question.on_no, NodeRef::Question(0));
        assert_eq!(questionnaire.title, "Pets");
    }

    #[test]
    fn given_unknown_result_key_when_building_then_fails() {
        let doc = document(vec![QuestionSpec {
            prompt: "?".to_string(),
            yes: EdgeSpec::Result("dog".to_string()),
            no: EdgeSpec::Result("cat".to_string()),
        }]);

        assert_eq!(
            TreeBuilder::build(&doc).unwrap_err(),
            DomainError::UnknownResult {
                question: 0,
                key: "dog".to_string()
            }
        );
    }

    #[test]
    fn given_index_past_end_when_building_then_out_of_range() {
        let doc = document(vec![QuestionSpec {
            prompt: "?".to_string(),
            yes: EdgeSpec::Question(1),
            no: EdgeSpec::Result("cat".to_string()),
        }]);

        assert!(matches!(
            TreeBuilder::build(&doc),
            Err(DomainError::QuestionOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn given_toml_with_mixed_edges_when_parsing_then_edges_are_typed() {
        let doc: TreeDocument = toml::from_str(
            r#"
title = "Pets"

[results.cat]
label = "Cat person"

[[questions]]
prompt = "Likes naps?"
yes = "cat"
no = 0
"#,
        )
        .unwrap();

        assert_eq!(doc.questions[0].yes, EdgeSpec::Result("cat".to_string()));
        assert_eq!(doc.questions[0].no, EdgeSpec::Question(0));
        assert_eq!(doc.results["cat"].description, "");
    }
}

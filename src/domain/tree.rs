use tracing::instrument;

use crate::domain::entities::{NodeRef, Question};
use crate::domain::error::{DomainError, DomainResult};

/// Index of the question every traversal starts from.
pub const ENTRY_INDEX: usize = 0;

/// Immutable yes/no decision graph.
///
/// Questions are addressed by their position in the list. Edges either point
/// at another question or end the traversal with an inline classification.
/// Several questions may share a successor, and questions unreachable from
/// the entry are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    questions: Vec<Question>,
}

impl DecisionTree {
    /// Build a tree, rejecting an empty list and edges to missing questions.
    ///
    /// Cycles and unreachable questions are not rejected here, see
    /// [`crate::domain::TreeReport`] for the authoring check.
    pub fn new(questions: Vec<Question>) -> DomainResult<Self> {
        if questions.is_empty() {
            return Err(DomainError::EmptyTree);
        }
        let len = questions.len();
        for question in &questions {
            for edge in question.edges() {
                if let NodeRef::Question(index) = edge {
                    if *index >= len {
                        return Err(DomainError::QuestionOutOfRange { index: *index, len });
                    }
                }
            }
        }
        Ok(Self { questions })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn question(&self, index: usize) -> DomainResult<&Question> {
        self.questions
            .get(index)
            .ok_or(DomainError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            })
    }

    /// Follow the yes edge for `true`, the no edge otherwise.
    pub fn resolve_edge(question: &Question, answer: bool) -> &NodeRef {
        if answer {
            &question.on_yes
        } else {
            &question.on_no
        }
    }

    pub fn entry(&self) -> usize {
        ENTRY_INDEX
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

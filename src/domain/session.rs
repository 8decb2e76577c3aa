//! Traversal session: the questionnaire's state machine
//!
//! A session walks one decision tree from the entry question. Each call to
//! [`TraversalSession::answer`] resolves exactly one edge: either the path grows
//! by the next question, or the session completes with a classification.
//! Answered steps are never revised; [`TraversalSession::reset`] discards the
//! whole walk.

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::entities::{Classification, NodeRef, Question};
use crate::domain::error::{DomainError, DomainResult, TransitionFault};
use crate::domain::tree::DecisionTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// One visited question as seen when rendering the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'t> {
    /// Position in the path (0-based)
    pub position: usize,
    /// Index of the question in the tree
    pub index: usize,
    pub question: &'t Question,
    /// `None` only for the pending question
    pub answer: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct TraversalSession<'t> {
    tree: &'t DecisionTree,
    path: Vec<usize>,
    answers: Vec<bool>,
    result: Option<&'t Classification>,
}

impl<'t> TraversalSession<'t> {
    pub fn new(tree: &'t DecisionTree) -> Self {
        Self {
            tree,
            path: vec![tree.entry()],
            answers: Vec::new(),
            result: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.result.is_some() {
            SessionState::Completed
        } else {
            SessionState::InProgress
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == SessionState::Completed
    }

    /// Question indices visited so far, entry first.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Answers by path position.
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    pub fn answer_at(&self, position: usize) -> Option<bool> {
        self.answers.get(position).copied()
    }

    pub fn result(&self) -> Option<&'t Classification> {
        self.result
    }

    /// Position of the pending question, `None` once completed.
    pub fn current_position(&self) -> Option<usize> {
        match self.state() {
            SessionState::InProgress => Some(self.path.len() - 1),
            SessionState::Completed => None,
        }
    }

    /// The pending question, `None` once completed.
    pub fn current_question(&self) -> Option<&'t Question> {
        let position = self.current_position()?;
        let tree = self.tree;
        // path entries are edge targets, range-checked when the tree was built
        tree.questions().get(self.path[position])
    }

    /// Answer the pending question at `position`.
    ///
    /// Fails with [`DomainError::InvalidTransition`] when the session is
    /// completed or `position` is not the pending one. A failed call leaves
    /// the session untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn answer(&mut self, position: usize, value: bool) -> DomainResult<SessionState> {
        let current = match self.current_position() {
            Some(current) => current,
            None => {
                return Err(DomainError::InvalidTransition {
                    position,
                    fault: TransitionFault::Completed,
                })
            }
        };
        if position != current {
            return Err(DomainError::InvalidTransition {
                position,
                fault: TransitionFault::NotCurrent { current },
            });
        }

        let tree = self.tree;
        let question = tree.question(self.path[position])?;
        let next = DecisionTree::resolve_edge(question, value);

        self.answers.push(value);
        match next {
            NodeRef::Question(index) => {
                debug!("position {} -> question {}", position, index);
                self.path.push(*index);
            }
            NodeRef::Result(classification) => {
                debug!("position {} -> result {}", position, classification);
                self.result = Some(classification);
            }
        }
        Ok(self.state())
    }

    /// Answer whatever question is pending.
    pub fn answer_current(&mut self, value: bool) -> DomainResult<SessionState> {
        let position = self.current_position().unwrap_or(self.path.len());
        self.answer(position, value)
    }

    /// Back to the entry question with no answers and no result.
    pub fn reset(&mut self) {
        debug!("reset session");
        self.path.clear();
        self.path.push(self.tree.entry());
        self.answers.clear();
        self.result = None;
    }

    /// Visited questions in order, with the answer given at each.
    pub fn steps(&self) -> impl Iterator<Item = Step<'t>> + '_ {
        let tree = self.tree;
        self.path
            .iter()
            .enumerate()
            .filter_map(move |(position, &index)| {
                tree.questions().get(index).map(|question| Step {
                    position,
                    index,
                    question,
                    answer: self.answers.get(position).copied(),
                })
            })
    }
}

impl PartialEq for TraversalSession<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree)
            && self.path == other.path
            && self.answers == other.answers
            && self.result == other.result
    }
}

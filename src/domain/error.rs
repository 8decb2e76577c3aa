//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

/// Why an answer was refused by a traversal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionFault {
    /// The session already holds a result
    Completed,
    /// Only the pending position may be answered
    NotCurrent { current: usize },
}

impl fmt::Display for TransitionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionFault::Completed => write!(f, "session already completed"),
            TransitionFault::NotCurrent { current } => {
                write!(f, "current position is {}", current)
            }
        }
    }
}

/// Domain errors represent contract violations of the decision tree and its sessions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("question index out of range: {index} (tree has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("invalid transition at position {position}: {fault}")]
    InvalidTransition {
        position: usize,
        fault: TransitionFault,
    },

    #[error("decision tree has no questions")]
    EmptyTree,

    #[error("question {question} references unknown result: {key}")]
    UnknownResult { question: usize, key: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

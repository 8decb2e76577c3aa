//! Domain layer: decision tree, traversal session and authoring checks
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod analysis;
pub mod builder;
pub mod entities;
pub mod error;
pub mod session;
pub mod tree;

pub use analysis::TreeReport;
pub use builder::{EdgeSpec, QuestionSpec, ResultSpec, TreeBuilder, TreeDocument};
pub use entities::*;
pub use error::{DomainError, DomainResult, TransitionFault};
pub use session::{SessionState, Step, TraversalSession};
pub use tree::{DecisionTree, ENTRY_INDEX};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Uses shellexpand crate; unexpandable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

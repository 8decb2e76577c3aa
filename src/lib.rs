//! rsdiag: yes/no decision-tree questionnaires
//!
//! The [`domain`] layer holds the engine: an immutable [`domain::DecisionTree`]
//! and a [`domain::TraversalSession`] that walks it one answer at a time.
//! [`application`] loads trees and drives sessions, [`cli`] is the terminal front end.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

//! Questionnaire service
//!
//! Loads questionnaires (built-in or from tree files), checks them and
//! replays answer sequences into transcripts.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::catalog::{BUILTIN_NAME, BUILTIN_TREE};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    Classification, Questionnaire, TraversalSession, TreeBuilder, TreeDocument, TreeReport,
};
use crate::infrastructure::traits::FileSystem;

/// Where a questionnaire comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    Builtin,
    File(PathBuf),
}

impl TreeSource {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => TreeSource::File(path.to_path_buf()),
            None => TreeSource::Builtin,
        }
    }
}

impl fmt::Display for TreeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeSource::Builtin => write!(f, "{}", BUILTIN_NAME),
            TreeSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One answered (or pending) question in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptStep {
    /// 1-based, as shown to the user (`Q1.`)
    pub number: usize,
    /// Question index in the tree
    pub index: usize,
    pub prompt: String,
    pub answer: Option<bool>,
}

/// Rendered history of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub steps: Vec<TranscriptStep>,
    pub result: Option<Classification>,
}

impl Transcript {
    pub fn from_session(session: &TraversalSession<'_>) -> Self {
        Self {
            steps: session
                .steps()
                .map(|step| TranscriptStep {
                    number: step.position + 1,
                    index: step.index,
                    prompt: step.question.prompt.clone(),
                    answer: step.answer,
                })
                .collect(),
            result: session.result().cloned(),
        }
    }

    /// Question indices in visiting order.
    pub fn path(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.index).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }
}

/// Service for loading and replaying questionnaires.
pub struct QuestionnaireService {
    fs: Arc<dyn FileSystem>,
}

impl QuestionnaireService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and build the questionnaire from `source`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, source: &TreeSource) -> ApplicationResult<Questionnaire> {
        match source {
            TreeSource::Builtin => Self::parse(BUILTIN_TREE, Path::new(BUILTIN_NAME)),
            TreeSource::File(path) => {
                if !self.fs.is_file(path) {
                    return Err(ApplicationError::InvalidTreeFile {
                        path: path.clone(),
                        message: "not a file".to_string(),
                    });
                }
                let content = self
                    .fs
                    .read_to_string(path)
                    .with_path_context("read tree file", path)?;
                Self::parse(&content, path)
            }
        }
    }

    /// Parse a TOML tree document and build it.
    pub fn parse(content: &str, origin: &Path) -> ApplicationResult<Questionnaire> {
        let document: TreeDocument =
            toml::from_str(content).map_err(|e| ApplicationError::InvalidTreeFile {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        let questionnaire = TreeBuilder::build(&document)?;
        debug!(
            "loaded '{}' from {} ({} questions)",
            questionnaire.title,
            origin.display(),
            questionnaire.tree.len()
        );
        Ok(questionnaire)
    }

    /// Authoring check: reachability, loops, longest walk.
    #[instrument(level = "debug", skip_all)]
    pub fn check(&self, questionnaire: &Questionnaire) -> TreeReport {
        let report = TreeReport::analyze(&questionnaire.tree);
        debug!(
            "check: reachable={} unreachable={:?} cycle_at={:?}",
            report.reachable.len(),
            report.unreachable,
            report.cycle_at
        );
        report
    }

    /// Feed `answers` into a fresh session, one per pending question.
    ///
    /// Stops early only by error: answers left over after completion are an
    /// invalid transition. Fewer answers than needed yield an incomplete transcript.
    #[instrument(level = "debug", skip(self, questionnaire))]
    pub fn replay(
        &self,
        questionnaire: &Questionnaire,
        answers: &[bool],
    ) -> ApplicationResult<Transcript> {
        let mut session = TraversalSession::new(&questionnaire.tree);
        for (position, &value) in answers.iter().enumerate() {
            session.answer(position, value)?;
        }
        Ok(Transcript::from_session(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;

    fn service() -> QuestionnaireService {
        QuestionnaireService::new(Arc::new(RealFileSystem))
    }

    #[test]
    fn given_builtin_source_when_loading_then_nine_questions() {
        let questionnaire = service().load(&TreeSource::Builtin).unwrap();

        assert_eq!(questionnaire.title, "仏教徒診断テスト");
        assert_eq!(questionnaire.tree.len(), 9);
    }

    #[test]
    fn given_broken_toml_when_parsing_then_invalid_tree_file() {
        let err = QuestionnaireService::parse("title = ", Path::new("x.toml")).unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidTreeFile { .. }));
    }

    #[test]
    fn given_partial_answers_when_replaying_then_transcript_incomplete() {
        let questionnaire = service().load(&TreeSource::Builtin).unwrap();

        let transcript = service().replay(&questionnaire, &[false]).unwrap();

        assert_eq!(transcript.path(), vec![0, 2]);
        assert_eq!(transcript.steps[1].number, 2);
        assert_eq!(transcript.steps[1].answer, None);
        assert!(!transcript.is_complete());
    }

    #[test]
    fn given_source_display_then_names_origin() {
        assert_eq!(TreeSource::Builtin.to_string(), BUILTIN_NAME);
        assert_eq!(
            TreeSource::from_option(Some(Path::new("a.toml"))),
            TreeSource::File(PathBuf::from("a.toml"))
        );
    }
}

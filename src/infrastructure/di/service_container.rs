//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{InterviewService, QuestionnaireService};
use crate::application::AnswerVocabulary;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, Prompter, RealFileSystem, TerminalPrompter};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive input abstraction
    pub prompter: Arc<dyn Prompter>,

    pub questionnaire: QuestionnaireService,
    pub interview: InterviewService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(TerminalPrompter))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let vocabulary = AnswerVocabulary::from_settings(&settings);
        let settings = Arc::new(settings);

        Self {
            questionnaire: QuestionnaireService::new(fs.clone()),
            interview: InterviewService::new(prompter.clone(), vocabulary),
            settings,
            fs,
            prompter,
        }
    }
}

//! Interactive interview: asks pending questions until the session completes

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::answer::AnswerVocabulary;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::TraversalSession;
use crate::infrastructure::traits::Prompter;

/// How an interview ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewOutcome {
    /// A classification was reached
    Completed,
    /// Input ran out before the session completed
    Abandoned,
}

pub struct InterviewService {
    prompter: Arc<dyn Prompter>,
    vocabulary: AnswerVocabulary,
}

impl InterviewService {
    pub fn new(prompter: Arc<dyn Prompter>, vocabulary: AnswerVocabulary) -> Self {
        Self {
            prompter,
            vocabulary,
        }
    }

    /// Ask until `session` completes or input ends.
    ///
    /// Each question is shown as `Q<n>. <prompt> [<hint>]`, numbered by path position.
    #[instrument(level = "debug", skip_all)]
    pub fn interview(
        &self,
        session: &mut TraversalSession<'_>,
    ) -> ApplicationResult<InterviewOutcome> {
        while let (Some(position), Some(question)) =
            (session.current_position(), session.current_question())
        {
            let prompt = format!(
                "Q{}. {} [{}]",
                position + 1,
                question.prompt,
                self.vocabulary.hint()
            );
            match self.ask_yes_no(&prompt)? {
                Some(value) => {
                    session.answer(position, value)?;
                }
                None => {
                    debug!("input ended at position {}", position);
                    return Ok(InterviewOutcome::Abandoned);
                }
            }
        }
        Ok(InterviewOutcome::Completed)
    }

    /// Yes/no question outside the tree. EOF counts as no.
    pub fn confirm(&self, prompt: &str) -> ApplicationResult<bool> {
        let prompt = format!("{} [{}]", prompt, self.vocabulary.hint());
        Ok(self.ask_yes_no(&prompt)?.unwrap_or(false))
    }

    /// Re-ask until the reply is understood; `None` on EOF.
    fn ask_yes_no(&self, prompt: &str) -> ApplicationResult<Option<bool>> {
        loop {
            let reply = self
                .prompter
                .ask(prompt)
                .map_err(|e| ApplicationError::OperationFailed {
                    context: "read answer".to_string(),
                    source: Box::new(e),
                })?;
            let Some(reply) = reply else {
                return Ok(None);
            };
            match self.vocabulary.parse(&reply) {
                Some(value) => return Ok(Some(value)),
                None => self.prompter.warn(&format!(
                    "unrecognised answer '{}', expected {}",
                    reply.trim(),
                    self.vocabulary.hint()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, DecisionTree, NodeRef, Question, SessionState};
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;

    /// Replies from a fixed script, recording prompts and warnings.
    #[derive(Default)]
    struct ScriptedPrompter {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
        warnings: Mutex<Vec<String>>,
    }

    impl ScriptedPrompter {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.replies.lock().unwrap().pop_front())
        }

        fn warn(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }
    }

    fn tree() -> DecisionTree {
        let leaf = |label: &str| NodeRef::Result(Classification::new(label, ""));
        DecisionTree::new(vec![
            Question::new("first?", NodeRef::Question(1), leaf("A")),
            Question::new("second?", leaf("B"), leaf("C")),
        ])
        .unwrap()
    }

    fn vocabulary() -> AnswerVocabulary {
        AnswerVocabulary::new(&["y".into()], &["n".into()])
    }

    #[test]
    fn given_scripted_replies_when_interviewing_then_completes() {
        let tree = tree();
        let prompter = Arc::new(ScriptedPrompter::new(&["y", "n"]));
        let service = InterviewService::new(prompter.clone(), vocabulary());
        let mut session = TraversalSession::new(&tree);

        let outcome = service.interview(&mut session).unwrap();

        assert_eq!(outcome, InterviewOutcome::Completed);
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.result().unwrap().label, "C");
        let prompts = prompter.prompts.lock().unwrap();
        assert_eq!(prompts[0], "Q1. first? [y/n]");
        assert_eq!(prompts[1], "Q2. second? [y/n]");
    }

    #[test]
    fn given_garbage_reply_when_interviewing_then_warns_and_reasks() {
        let tree = tree();
        let prompter = Arc::new(ScriptedPrompter::new(&["what", "n"]));
        let service = InterviewService::new(prompter.clone(), vocabulary());
        let mut session = TraversalSession::new(&tree);

        service.interview(&mut session).unwrap();

        assert_eq!(prompter.warnings.lock().unwrap().len(), 1);
        assert_eq!(session.answers(), &[false]);
        assert_eq!(session.result().unwrap().label, "A");
    }

    #[test]
    fn given_input_ends_when_interviewing_then_abandoned_in_progress() {
        let tree = tree();
        let prompter = Arc::new(ScriptedPrompter::new(&["y"]));
        let service = InterviewService::new(prompter, vocabulary());
        let mut session = TraversalSession::new(&tree);

        let outcome = service.interview(&mut session).unwrap();

        assert_eq!(outcome, InterviewOutcome::Abandoned);
        assert_eq!(session.path(), &[0, 1]);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn given_eof_when_confirming_then_false() {
        let service = InterviewService::new(Arc::new(ScriptedPrompter::new(&[])), vocabulary());

        assert!(!service.confirm("again?").unwrap());
    }
}

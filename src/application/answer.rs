//! Mapping typed replies onto yes/no answers

use crate::config::Settings;

/// Words accepted as yes or no, compared case-insensitively after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerVocabulary {
    yes: Vec<String>,
    no: Vec<String>,
}

impl AnswerVocabulary {
    pub fn new(yes: &[String], no: &[String]) -> Self {
        Self {
            yes: normalize(yes),
            no: normalize(no),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.yes_words, &settings.no_words)
    }

    /// `None` for anything not in either list. A word in both lists counts as yes.
    pub fn parse(&self, reply: &str) -> Option<bool> {
        let reply = reply.trim().to_lowercase();
        if self.yes.contains(&reply) {
            Some(true)
        } else if self.no.contains(&reply) {
            Some(false)
        } else {
            None
        }
    }

    /// Hint shown next to a prompt, e.g. `y/n`.
    pub fn hint(&self) -> String {
        match (self.yes.first(), self.no.first()) {
            (Some(yes), Some(no)) => format!("{}/{}", yes, no),
            _ => String::new(),
        }
    }
}

fn normalize(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.trim().to_lowercase()).collect()
}

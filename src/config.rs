//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsdiag/rsdiag.toml`
//! 3. Local config: `<dir>/.rsdiag.toml` (`-C <dir>`, default cwd)
//! 4. Environment variables: `RSDIAG_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing (Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree: Option<PathBuf>,
    pub yes_words: Option<Vec<String>>,
    pub no_words: Option<Vec<String>>,
    pub color: Option<bool>,
}

/// Unified configuration for rsdiag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree file to run instead of the built-in questionnaire
    pub tree: Option<PathBuf>,
    /// Replies accepted as "yes"; the first one is shown as hint
    pub yes_words: Vec<String>,
    /// Replies accepted as "no"; the first one is shown as hint
    pub no_words: Vec<String>,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree: None,
            yes_words: vec!["y".into(), "yes".into(), "はい".into()],
            no_words: vec!["n".into(), "no".into(), "いいえ".into()],
            color: true,
        }
    }
}

/// Get the XDG config directory for rsdiag.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsdiag").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsdiag.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rsdiag.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge word lists with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated, base order is kept, additions follow
    ///
    /// # Examples
    /// ```ignore
    /// merge_words(&["y", "yes"], &["ok"])    // → ["y", "yes", "ok"]
    /// merge_words(&["y", "yes"], &["!y"])    // → ["yes"]
    /// ```
    pub fn merge_words(base: &[String], overlay: &[String]) -> Vec<String> {
        let removed: HashSet<&str> = overlay
            .iter()
            .filter_map(|w| w.strip_prefix('!'))
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        base.iter()
            .chain(overlay.iter().filter(|w| !w.starts_with('!')))
            .filter(|w| !removed.contains(w.as_str()))
            .filter(|w| seen.insert((*w).clone()))
            .cloned()
            .collect()
    }

    /// Expand shell variables and tilde in the tree path.
    fn expand_paths(&mut self) {
        if let Some(tree) = &self.tree {
            self.tree = Some(PathBuf::from(expand_env_vars(
                tree.to_string_lossy().as_ref(),
            )));
        }
    }

    /// Merge local overlay onto self (base) with union semantics for word lists.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree: overlay.tree.clone().or_else(|| self.tree.clone()),
            yes_words: overlay
                .yes_words
                .as_ref()
                .map(|o| Self::merge_words(&self.yes_words, o))
                .unwrap_or_else(|| self.yes_words.clone()),
            no_words: overlay
                .no_words
                .as_ref()
                .map(|o| Self::merge_words(&self.no_words, o))
                .unwrap_or_else(|| self.no_words.clone()),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for word lists.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            tree: global.tree.clone().or_else(|| self.tree.clone()),
            yes_words: global
                .yes_words
                .clone()
                .unwrap_or_else(|| self.yes_words.clone()),
            no_words: global
                .no_words
                .clone()
                .unwrap_or_else(|| self.no_words.clone()),
            color: global.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.rsdiag.toml`
    ///
    /// # Word List Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!word` negation
    /// - Any → Env vars: REPLACE
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_from(global.as_deref(), local_dir)
    }

    /// Same as [`Settings::load`] with an explicit global config path.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply RSDIAG_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RSDIAG")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("yes_words")
                    .with_list_parse_key("no_words")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree") {
            settings.tree = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get::<Vec<String>>("yes_words") {
            settings.yes_words = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("no_words") {
            settings.no_words = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rsdiag configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rsdiag/rsdiag.toml  (defines your baseline)
#   Local:  <dir>/.rsdiag.toml            (per-directory additions, -C <dir>)
#   Env:    RSDIAG_* environment variables (explicit overrides)
#
# Word lists in global config REPLACE the defaults.
# Word lists in local config UNION with global; "!word" removes an inherited word.

# Tree file to run instead of the built-in questionnaire
# tree = "~/quizzes/pets.toml"

# Replies accepted as yes / no (first word is shown as hint)
# yes_words = ["y", "yes", "はい"]
# no_words = ["n", "no", "いいえ"]

# Colored output (NO_COLOR is honoured as well)
# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_default_settings_then_builtin_tree_and_bilingual_words() {
        let settings = Settings::default();
        assert!(settings.tree.is_none());
        assert!(settings.yes_words.contains(&"はい".to_string()));
        assert!(settings.no_words.contains(&"n".to_string()));
        assert!(settings.color);
    }

    #[test]
    fn given_tilde_in_tree_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            tree: Some(PathBuf::from("~/quiz.toml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let tree = settings.tree.unwrap();
        assert!(tree.to_string_lossy().starts_with(&home));
        assert!(!tree.to_string_lossy().contains('~'));
    }

    // ========================================
    // Tests for merge_words union semantics
    // ========================================

    #[test]
    fn test_merge_words_union_keeps_order() {
        let result = Settings::merge_words(&words(&["y", "yes"]), &words(&["ok"]));
        assert_eq!(result, words(&["y", "yes", "ok"]));
    }

    #[test]
    fn test_merge_words_negation() {
        let result = Settings::merge_words(&words(&["y", "yes"]), &words(&["!y", "ok"]));
        assert_eq!(result, words(&["yes", "ok"]));
    }

    #[test]
    fn test_merge_words_negation_nonexistent() {
        let result = Settings::merge_words(&words(&["y"]), &words(&["!x"]));
        assert_eq!(result, words(&["y"]));
    }

    #[test]
    fn test_merge_words_duplicates() {
        let result = Settings::merge_words(&words(&["y", "yes"]), &words(&["y", "ok"]));
        assert_eq!(result, words(&["y", "yes", "ok"]));
    }

    #[test]
    fn test_apply_global_replaces_words() {
        let global = RawSettings {
            yes_words: Some(words(&["oui"])),
            ..RawSettings::default()
        };

        let result = Settings::default().apply_global(&global);

        assert_eq!(result.yes_words, words(&["oui"]));
        assert_eq!(result.no_words, Settings::default().no_words);
    }

    #[test]
    fn test_merge_with_unions_words_and_overrides_scalars() {
        let local = RawSettings {
            tree: Some(PathBuf::from("pets.toml")),
            no_words: Some(words(&["nope", "!no"])),
            color: Some(false),
            ..RawSettings::default()
        };

        let result = Settings::default().merge_with(&local);

        assert_eq!(result.tree, Some(PathBuf::from("pets.toml")));
        assert_eq!(result.no_words, words(&["n", "いいえ", "nope"]));
        assert!(!result.color);
    }
}

//! Questionnaires shipped with the binary.

/// The Buddhist personality test, used when no tree file is configured.
pub const BUILTIN_TREE: &str = include_str!("../assets/buddhist.toml");

/// Display name of the built-in tree source.
pub const BUILTIN_NAME: &str = "builtin:buddhist";

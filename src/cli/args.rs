//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Interactive yes/no questionnaire: walk the decision tree, reveal your classification
#[derive(Parser, Debug)]
#[command(name = "rsdiag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory with local .rsdiag.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Tree file to use instead of the configured/built-in one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub tree: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer the questionnaire interactively (default)
    Run {
        /// Do not offer to start over after the result
        #[arg(long)]
        once: bool,
    },

    /// Replay a sequence of answers and print the transcript
    Replay {
        /// Answers in order, e.g. `n y y y`
        #[arg(required = true, num_args = 1..)]
        answers: Vec<String>,
    },

    /// Check the tree for unreachable questions and loops
    Check,

    /// Show the tree structure
    Show,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show status
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective configuration
    Show,
    /// Print config file locations
    Path,
    /// Print a commented config template
    Template,
}

//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Line-based interactive input.
pub trait Prompter: Send + Sync {
    /// Show `prompt` and read one reply.
    /// Returns None once input is exhausted (EOF / Ctrl-D).
    fn ask(&self, prompt: &str) -> io::Result<Option<String>>;

    /// Tell the user their reply was not understood.
    fn warn(&self, message: &str);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Terminal prompter: cyan prompt on stdout, reply from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", prompt.cyan())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn warn(&self, message: &str) {
        eprintln!("{}: {}", "Warning".yellow(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_existing_file_when_reading_then_returns_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tree.toml");
        fs::write(&path, "title = \"x\"").unwrap();

        let fs = RealFileSystem;
        assert!(fs.exists(&path));
        assert!(fs.is_file(&path));
        assert!(!fs.is_file(temp.path()));
        assert_eq!(fs.read_to_string(&path).unwrap(), "title = \"x\"");
    }

    #[test]
    fn given_missing_file_when_reading_then_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");

        let fs = RealFileSystem;
        assert!(!fs.exists(&path));
        assert_eq!(
            fs.read_to_string(&path).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}

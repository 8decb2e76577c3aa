//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print an answered question: number dimmed, answer blue for yes, red for no
pub fn answered(number: usize, prompt: &str, answer: Option<bool>) {
    let label = format!("Q{}.", number);
    let answer = match answer {
        Some(true) => "はい".blue().bold().to_string(),
        Some(false) => "いいえ".red().bold().to_string(),
        None => "…".dimmed().to_string(),
    };
    println!("{} {} {}", label.dimmed(), prompt, answer);
}

/// Print the revealed classification with its description
pub fn classification(label: &str, description: &str) {
    println!();
    println!("{}", "あなたは...".bold());
    println!("{}", label.blue().bold());
    for line in description.lines() {
        println!("{}", line);
    }
}

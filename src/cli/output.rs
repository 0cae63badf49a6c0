//! Coloured terminal output for command results
//!
//! Results go to stdout, diagnostics to stderr. `colored` honours NO_COLOR
//! and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

/// Width of the label column in [`field`] lines.
const LABEL_WIDTH: usize = 14;

/// Failure report on stderr.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Non-fatal problem on stderr.
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// Completed change to a file.
pub fn done(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Name of the record or file whose details follow.
pub fn title(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// One attribute of the current record, label column aligned.
pub fn field(label: &str, value: &(impl Display + ?Sized)) {
    println!("  {} {}", format!("{label:<LABEL_WIDTH$}").green(), value);
}

/// One entry of a listing below a title.
pub fn item(msg: &(impl Display + ?Sized)) {
    println!("  - {}", msg);
}

/// Unstyled output, e.g. file content or rendered trees.
pub fn plain(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

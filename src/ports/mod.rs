//! Ports to external capabilities: subprocesses and interactive prompts.

use std::path::Path;

use crate::domain::AppError;

/// Runs external commands (composer, artisan) in the project directory.
pub trait ProcessRunner {
    /// Run a command and fail on non-zero exit, surfacing captured stderr.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), AppError>;

    /// Run a command and ignore its outcome (fire-and-forget).
    fn run_quiet(&self, program: &str, args: &[&str], cwd: &Path);
}

/// Interactive prompt capability; bypassed entirely in non-interactive mode.
pub trait Prompter {
    /// Ask a yes/no question with a default answer.
    fn confirm(&self, label: &str, default: bool) -> Result<bool, AppError>;

    /// Ask for free text; `None` means the user left it empty or aborted.
    fn text(&self, label: &str, placeholder: &str) -> Result<Option<String>, AppError>;
}

//! Prompt adapters: interactive terminal and assume-defaults.

use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError, Input};

use crate::domain::AppError;
use crate::ports::Prompter;

/// Interactive prompts on the controlling terminal via dialoguer.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, label: &str, default: bool) -> Result<bool, AppError> {
        match Confirm::new().with_prompt(label).default(default).interact() {
            Ok(answer) => Ok(answer),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(default),
            Err(err) => Err(AppError::Prompt(format!("Failed to read confirmation: {}", err))),
        }
    }

    fn text(&self, label: &str, placeholder: &str) -> Result<Option<String>, AppError> {
        let result = Input::<String>::new()
            .with_prompt(format!("{label} ({placeholder})"))
            .allow_empty(true)
            .interact_text();

        match result {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(AppError::Prompt(format!("Failed to read input: {}", err))),
        }
    }
}

/// Non-interactive prompter: every confirm takes its default, every text
/// prompt is left empty. Used for `--no-interaction` and in tests.
#[derive(Debug, Clone, Default)]
pub struct AssumeDefaults;

impl Prompter for AssumeDefaults {
    fn confirm(&self, _label: &str, default: bool) -> Result<bool, AppError> {
        Ok(default)
    }

    fn text(&self, _label: &str, _placeholder: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }
}

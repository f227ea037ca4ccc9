use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for larkit operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// composer.json could not be serialized or deserialized.
    #[error("composer.json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An invoked external command exited non-zero.
    #[error("Command failed '{command}': {details}")]
    ProcessFailed { command: String, details: String },

    /// composer.json parsed but did not have the expected shape.
    #[error("composer.json malformed: {0}")]
    MalformedManifest(String),

    /// A project file required for patching is missing.
    #[error("Required project file not found: {}", .0.display())]
    MissingProjectFile(PathBuf),

    /// Generator target already exists and --force was not given.
    #[error("File already exists: {} (use --force to overwrite)", .0.display())]
    FileExists(PathBuf),

    /// Interactive prompt failed or was aborted.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Generator name is empty or unusable.
    #[error("Invalid name '{0}': must contain at least one alphanumeric character")]
    InvalidName(String),

    /// Boilerplate template failed to render.
    #[error("Template render failed: {0}")]
    Template(String),
}

impl AppError {
    pub(crate) fn process<C: Into<String>, D: Into<String>>(command: C, details: D) -> Self {
        AppError::ProcessFailed { command: command.into(), details: details.into() }
    }
}

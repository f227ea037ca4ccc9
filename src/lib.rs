//! larkit: install an opinionated Laravel stack and generate Action/DTO boilerplate.

pub mod commands;
pub mod domain;
pub mod ports;
pub mod services;
pub mod stubs;
pub mod templates;

use std::path::PathBuf;

use domain::Project;
use ports::Prompter;
use services::{AssumeDefaults, ShellRunner, TerminalPrompter};

pub use commands::install::{InstallOptions, InstallReport};
pub use commands::make_action::MakeActionOptions;
pub use commands::make_dto::MakeDtoOptions;
pub use domain::{AppError, FeatureFlags, FeatureSelection};

/// Run the full install pipeline against the current directory.
pub fn install(options: InstallOptions) -> Result<InstallReport, AppError> {
    let project = Project::current()?;
    let runner = ShellRunner::new();
    let prompter: &dyn Prompter =
        if options.no_interaction { &AssumeDefaults } else { &TerminalPrompter };

    commands::install::execute(&project, &options, &runner, prompter)
}

/// Generate an Action class in the current project.
pub fn make_action(options: MakeActionOptions) -> Result<PathBuf, AppError> {
    let project = Project::current()?;
    commands::make_action::execute(&project, &options)
}

/// Generate a DTO class in the current project.
pub fn make_dto(options: MakeDtoOptions) -> Result<PathBuf, AppError> {
    let project = Project::current()?;
    let prompter: &dyn Prompter =
        if options.no_interaction { &AssumeDefaults } else { &TerminalPrompter };

    commands::make_dto::execute(&project, &options, prompter)
}

//! Adapters backing the ports with real capabilities.

pub mod process;
pub mod prompt;

pub use process::ShellRunner;
pub use prompt::{AssumeDefaults, TerminalPrompter};

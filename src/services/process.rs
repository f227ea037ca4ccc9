//! Subprocess adapter over `std::process::Command`.

use std::path::Path;
use std::process::Command;

use crate::domain::AppError;
use crate::ports::ProcessRunner;

/// Runs commands through the system shell environment.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), AppError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| AppError::process(display_command(program, args), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::process(
                display_command(program, args),
                if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            ));
        }

        Ok(())
    }

    fn run_quiet(&self, program: &str, args: &[&str], cwd: &Path) {
        let _ = Command::new(program).args(args).current_dir(cwd).output();
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    format!("{} {}", program, args.join(" "))
}

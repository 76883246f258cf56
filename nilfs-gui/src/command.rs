//! External command execution
//!
//! Everything the application knows about the system comes from running
//! tools and reading their output. Commands are always run with an argument
//! vector and block the calling thread until they exit.

use anyhow::{Context, Result};
use std::process::Command;

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout followed by stderr, the way a terminal would show them
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Runs external programs
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit
    ///
    /// Returns `Err` only when the program could not be started; a non-zero
    /// exit status is reported through [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runs commands on the host with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        log::debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {program}"))?;

        if !output.status.success() {
            log::debug!("{program} exited with {}", output.status);
        }

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

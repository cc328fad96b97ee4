use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{AppError, Result};

/// Captured outcome of a single git invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }
}

/// Port for running the git executable
pub trait GitPort {
    /// Run `git <args>` inside `cwd`.
    ///
    /// With `strict` set, a non-zero exit becomes
    /// [`AppError::ExternalCommand`]; otherwise it is returned as data.
    fn execute(&self, cwd: &Path, args: &[&str], strict: bool) -> Result<CommandResult>;

    /// Run `git <args>` with its output going straight to the terminal.
    ///
    /// Always strict. Whatever the runner did capture is returned so the
    /// caller can still show it.
    fn stream(&self, cwd: &Path, args: &[&str]) -> Result<CommandResult> {
        self.execute(cwd, args, true)
    }
}

impl<G: GitPort + ?Sized> GitPort for &G {
    fn execute(&self, cwd: &Path, args: &[&str], strict: bool) -> Result<CommandResult> {
        (**self).execute(cwd, args, strict)
    }

    fn stream(&self, cwd: &Path, args: &[&str]) -> Result<CommandResult> {
        (**self).stream(cwd, args)
    }
}

/// Git adapter that spawns the `git` binary found on `PATH`
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
}

impl SystemGit {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    fn describe(&self, args: &[&str]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitPort for SystemGit {
    fn execute(&self, cwd: &Path, args: &[&str], strict: bool) -> Result<CommandResult> {
        let command = self.describe(args);
        debug!(%command, cwd = %cwd.display(), strict, "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| AppError::Spawn {
                command: command.clone(),
                source,
            })?;

        let result = CommandResult {
            succeeded: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };
        debug!(%command, exit_code = result.exit_code, "git finished");

        if strict && !result.succeeded {
            return Err(AppError::ExternalCommand {
                command,
                code: output.status.code(),
                stderr: result.stderr,
            });
        }

        Ok(result)
    }

    fn stream(&self, cwd: &Path, args: &[&str]) -> Result<CommandResult> {
        let command = self.describe(args);
        debug!(%command, cwd = %cwd.display(), "streaming git");

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| AppError::Spawn {
                command: command.clone(),
                source,
            })?;
        debug!(%command, exit_code = ?status.code(), "git finished");

        if !status.success() {
            // stderr already reached the terminal
            return Err(AppError::ExternalCommand {
                command,
                code: status.code(),
                stderr: String::new(),
            });
        }

        Ok(CommandResult {
            succeeded: true,
            exit_code: status.code().unwrap_or(0),
            ..CommandResult::default()
        })
    }
}

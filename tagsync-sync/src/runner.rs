//! Command execution seam.
//!
//! The orchestrator only ever talks to a [`CommandRunner`]; [`GitRunner`] is
//! the one that actually spawns processes.

use std::path::PathBuf;
use std::process::Command;

use crate::error::SyncError;

/// Runs one external command to completion and returns its combined output.
pub trait CommandRunner {
    /// `args[0]` is the program. Output is stdout followed by stderr, trimmed.
    ///
    /// A non-zero exit yields [`SyncError::CommandFailed`] unless
    /// `ignore_error` is set, in which case the output is returned as usual.
    fn run(&self, args: &[String], ignore_error: bool) -> Result<String, SyncError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[String], ignore_error: bool) -> Result<String, SyncError> {
        (**self).run(args, ignore_error)
    }
}

/// Blocking runner on top of `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct GitRunner {
    current_dir: Option<PathBuf>,
}

impl GitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir` instead of the process cwd.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: Some(dir.into()),
        }
    }
}

impl CommandRunner for GitRunner {
    fn run(&self, args: &[String], ignore_error: bool) -> Result<String, SyncError> {
        let command = args.join(" ");
        let Some((program, rest)) = args.split_first() else {
            return Err(SyncError::Spawn {
                command,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
            });
        };

        let mut cmd = Command::new(program);
        cmd.args(rest);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!("running: {command}");
        let output = cmd
            .output()
            .map_err(|source| SyncError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim().to_string();

        if !output.status.success() && !ignore_error {
            return Err(SyncError::CommandFailed {
                command,
                output: combined,
            });
        }
        if !output.status.success() {
            tracing::debug!("ignored failure ({}): {command}", output.status);
        }
        Ok(combined)
    }
}

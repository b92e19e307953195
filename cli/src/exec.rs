//! Fail-fast external command execution.
//!
//! Every side effect of a provisioning run goes through an [`Executor`].
//! [`SystemExecutor`] spawns real processes with inherited stdio so package
//! managers, `sudo` and `chsh` can prompt on the terminal; tests substitute a
//! recording mock.
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::Result;

use crate::error::ExecError;

/// Result of a command execution.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Captured standard output (empty when stdio was inherited).
    pub stdout: String,
    /// Captured standard error (empty when stdio was inherited).
    pub stderr: String,
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Render `program args…` as a single line for logs and diagnostics.
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Abstraction over process execution.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command with inherited stdio. Fails if it exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Spawn`] if the program cannot be started and
    /// [`ExecError::CommandFailed`] if it exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command in `dir` with inherited stdio. Fails if it exits non-zero.
    ///
    /// # Errors
    ///
    /// Same as [`Executor::run`].
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command with captured output, allowing failure.
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be started.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn execute_checked(mut cmd: Command, line: String) -> Result<ExecResult> {
        tracing::debug!("exec: {line}");
        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecError::Spawn {
                command: line.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ExecError::CommandFailed {
                command: line,
                code: status.code(),
            }
            .into());
        }
        Ok(ExecResult {
            success: true,
            code: status.code(),
            ..ExecResult::default()
        })
    }
}

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        Self::execute_checked(cmd, command_line(program, args))
    }

    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(dir);
        Self::execute_checked(cmd, command_line(program, args))
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let line = command_line(program, args);
        tracing::debug!("exec (unchecked): {line}");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecError::Spawn {
                command: line,
                source,
            })?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

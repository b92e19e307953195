//! Named tasks, run in a fixed order, that carry out the installation plan.
pub mod bootstrap;
pub mod build;
mod context;
pub mod manual;
pub mod packages;
mod processing;
pub mod shell;
pub mod symlinks;
pub mod systemd;
pub mod update;

pub use context::{Context, DEFAULT_SHELL, RunOptions};
pub use processing::{TaskResult, TaskStats, process_resources};

use std::path::Path;

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &'static str;

    /// Whether this task applies to the current distro and plan.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if an external command exits non-zero or a
    /// filesystem change cannot be made.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Every task, in execution order.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(bootstrap::BootstrapYay),
        Box::new(update::UpdatePackageManagers),
        Box::new(packages::InstallPackages),
        Box::new(build::BuildFromSource),
        Box::new(manual::ReportManualPackages),
        Box::new(systemd::EnableServices),
        Box::new(symlinks::InstallSymlinks),
        Box::new(shell::ConfigureShell),
    ]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error after recording it as failed; the caller stops
/// the run.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            return Err(e.context(task.name()));
        }
    }
    Ok(())
}

/// Run a command, or log it in dry-run mode.
///
/// # Errors
///
/// Returns an error if the command exits non-zero.
pub fn run_or_log(ctx: &Context, program: &str, args: &[&str]) -> Result<()> {
    let line = crate::exec::command_line(program, args);
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would run: {line}"));
        return Ok(());
    }
    ctx.log.debug(&format!("running: {line}"));
    ctx.executor.run(program, args)?;
    Ok(())
}

/// Run a command in `dir`, or log it in dry-run mode.
///
/// # Errors
///
/// Returns an error if the command exits non-zero.
pub fn run_in_or_log(ctx: &Context, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let line = crate::exec::command_line(program, args);
    if ctx.dry_run {
        ctx.log
            .dry_run(&format!("would run in {}: {line}", dir.display()));
        return Ok(());
    }
    ctx.log
        .debug(&format!("running in {}: {line}", dir.display()));
    ctx.executor.run_in(dir, program, args)?;
    Ok(())
}

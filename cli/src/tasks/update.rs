//! Task: refresh package databases before installing.
use anyhow::Result;

use super::{Context, Task, TaskResult, run_or_log};

/// Run each chosen manager's update command (opt-in with `--update`).
#[derive(Debug)]
pub struct UpdatePackageManagers;

impl Task for UpdatePackageManagers {
    fn name(&self) -> &'static str {
        "Update package managers"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.options.update && !ctx.resolution.pm_packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for batch in &ctx.resolution.pm_packages {
            let Some((program, args)) = batch.manager.update_invocation() else {
                ctx.log
                    .debug(&format!("{} has no update step", batch.manager));
                continue;
            };
            ctx.log.info(&format!("Updating {}", batch.manager));
            run_or_log(ctx, program, &args)?;
        }
        Ok(TaskResult::done(ctx))
    }
}

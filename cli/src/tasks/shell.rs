//! Login shell task.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources};
use crate::resources::Resource as _;
use crate::resources::shell::DefaultShellResource;

/// Configure the default login shell (`/bin/zsh` unless `--shell` says otherwise).
#[derive(Debug)]
pub struct ConfigureShell;

impl Task for ConfigureShell {
    fn name(&self) -> &'static str {
        "Configure shell"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resource = DefaultShellResource::from_env(ctx.options.shell.clone(), &*ctx.executor);
        if !ctx.dry_run && resource.needs_change()? {
            ctx.log.info("You need to input your password here:");
        }
        process_resources(ctx, std::iter::once(resource), "configure")
    }
}

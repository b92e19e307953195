//! Enable the services declared by installed packages.
use anyhow::Result;

use super::{Context, Task, TaskResult, run_or_log};

/// Enable the system services declared by installed or built packages.
#[derive(Debug)]
pub struct EnableServices;

impl Task for EnableServices {
    fn name(&self) -> &'static str {
        "Enable services"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.resolution.enable_services.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let services = &ctx.resolution.enable_services;
        ctx.log
            .info(&format!("Enabling services: {}", services.join(" ")));

        let mut args = vec!["systemctl", "enable"];
        args.extend(services.iter().map(String::as_str));
        run_or_log(ctx, "sudo", &args)?;
        Ok(TaskResult::done(ctx))
    }
}

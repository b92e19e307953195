//! Report of mandatory packages that must be installed by hand.
use anyhow::Result;

use super::{Context, Task, TaskResult};

/// Warn about mandatory packages that could be neither installed nor built.
#[derive(Debug)]
pub struct ReportManualPackages;

impl Task for ReportManualPackages {
    fn name(&self) -> &'static str {
        "Report manual packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.resolution.manual_packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        ctx.log.warn(&format!(
            "You have to install these packages manually: {}",
            ctx.resolution.manual_packages.join(" ")
        ));
        // Reporting is the same in dry-run mode.
        Ok(TaskResult::Ok)
    }
}

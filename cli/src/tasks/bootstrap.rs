//! Task: build the `yay` AUR helper on Arch Linux.
use anyhow::Result;

use super::{Context, Task, TaskResult, run_in_or_log, run_or_log};
use crate::resources::git_repo::GitCloneResource;
use crate::resources::package::PackageManager;
use crate::resources::{Applicable as _, Resource as _};

/// AUR repository of the `yay` package.
pub const YAY_REPO: &str = "https://aur.archlinux.org/yay.git";

/// Install `yay` from the AUR when `yay -v` fails.
#[derive(Debug)]
pub struct BootstrapYay;

impl Task for BootstrapYay {
    fn name(&self) -> &'static str {
        "Bootstrap yay"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.distro.uses_aur_helper()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let present = ctx
            .executor
            .run_unchecked("yay", &["-v"])
            .is_ok_and(|r| r.success);
        if present {
            return Ok(TaskResult::Skipped("yay already installed".to_string()));
        }

        ctx.log.info("yay does not exist, installing yay");

        let (program, args) = PackageManager::Pacman.install_invocation(&["base-devel"]);
        run_or_log(ctx, program, &args)?;

        let dest = ctx.build_dir().join("yay");
        let clone = GitCloneResource::new(YAY_REPO, dest.clone(), &*ctx.executor);
        if ctx.dry_run {
            if clone.needs_change()? {
                ctx.log.dry_run(&format!("would clone {}", clone.description()));
            }
        } else {
            clone.apply()?;
        }

        run_in_or_log(ctx, &dest, "makepkg", &["-si"])?;
        Ok(TaskResult::done(ctx))
    }
}

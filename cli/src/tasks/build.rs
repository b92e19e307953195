//! Task: build packages that no package manager on this distro carries.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult, run_in_or_log};
use crate::resolver::SourceBuild;
use crate::resources::git_repo::GitCloneResource;
use crate::resources::{Applicable as _, Resource as _};

/// Clone and build each source recipe under `~/build`.
#[derive(Debug)]
pub struct BuildFromSource;

impl Task for BuildFromSource {
    fn name(&self) -> &'static str {
        "Build from source"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.resolution.build_packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let names: Vec<&str> = ctx
            .resolution
            .build_packages
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        ctx.log.info(&format!(
            "Installing source code based packages: {}",
            names.join(" ")
        ));

        let build_dir = ctx.build_dir();
        if !ctx.fs_ops.exists(&build_dir) {
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would create {}", build_dir.display()));
            } else {
                ctx.fs_ops
                    .create_dir_all(&build_dir)
                    .with_context(|| format!("creating {}", build_dir.display()))?;
            }
        }

        for build in &ctx.resolution.build_packages {
            build_one(ctx, build).with_context(|| format!("building {}", build.name))?;
        }
        Ok(TaskResult::done(ctx))
    }
}

fn build_one(ctx: &Context, build: &SourceBuild) -> Result<()> {
    ctx.log.debug(&format!("building {}", build.name));

    let workdir = if let Some(repo) = &build.from_source.git_repo {
        let dest = ctx.build_dir().join(&build.name);
        let clone = GitCloneResource::new(repo.as_str(), dest.clone(), &*ctx.executor);
        if ctx.dry_run {
            if clone.needs_change()? {
                ctx.log
                    .dry_run(&format!("would clone {}", clone.description()));
            }
        } else {
            clone.apply()?;
        }
        dest
    } else {
        ctx.home.clone()
    };

    for command in &build.from_source.install_commands {
        let Some((program, rest)) = command.split_first() else {
            anyhow::bail!("empty install command");
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        run_in_or_log(ctx, &workdir, program, &args)?;
    }
    Ok(())
}

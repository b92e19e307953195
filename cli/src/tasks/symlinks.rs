//! Dotfile symlinks from `<dotfiles>/config` into the home directory.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{Context, Task, TaskResult, process_resources};
use crate::resources::symlink::SymlinkResource;

/// Link each entry of the dotfiles config directory into `$HOME`.
///
/// Directories land in `~/.config/<name>`, everything else in `~/<name>`.
#[derive(Debug)]
pub struct InstallSymlinks;

impl Task for InstallSymlinks {
    fn name(&self) -> &'static str {
        "Install symlinks"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let config_dir = ctx.config.config_dir();
        if !ctx.fs_ops.is_dir(&config_dir) {
            anyhow::bail!("config directory {} does not exist", config_dir.display());
        }

        let xdg = ctx.xdg_config_dir();
        if !ctx.fs_ops.exists(&xdg) {
            if ctx.dry_run {
                ctx.log.dry_run(&format!("would create {}", xdg.display()));
            } else {
                ctx.fs_ops
                    .create_dir_all(&xdg)
                    .with_context(|| format!("creating {}", xdg.display()))?;
            }
        }

        let entries = ctx
            .fs_ops
            .read_dir(&config_dir)
            .with_context(|| format!("reading {}", config_dir.display()))?;

        let resources: Vec<SymlinkResource> = entries
            .into_iter()
            .filter_map(|source| {
                let target = link_target(ctx, &source)?;
                Some(SymlinkResource::new(source, target))
            })
            .collect();

        process_resources(ctx, resources, "link")
    }
}

fn link_target(ctx: &Context, source: &Path) -> Option<PathBuf> {
    let name = source.file_name()?;
    let base = if ctx.fs_ops.is_dir(source) {
        ctx.xdg_config_dir()
    } else {
        ctx.home.clone()
    };
    Some(base.join(name))
}

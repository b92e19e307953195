//! Batched package installation, one invocation per manager.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::exec::command_line;
use crate::resources::package::batch_install;

/// Install resolved packages, one batched invocation per manager.
#[derive(Debug)]
pub struct InstallPackages;

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        "Install packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.resolution.pm_packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for batch in &ctx.resolution.pm_packages {
            ctx.log.info(&format!(
                "Installing {} managed packages: {}",
                batch.manager,
                batch.names.join(" ")
            ));
            if ctx.dry_run {
                let names: Vec<&str> = batch.names.iter().map(String::as_str).collect();
                let (program, args) = batch.manager.install_invocation(&names);
                ctx.log
                    .dry_run(&format!("would run: {}", command_line(program, &args)));
                continue;
            }
            batch_install(&*ctx.executor, batch.manager, &batch.names)?;
        }
        Ok(TaskResult::done(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::package;
    use crate::distro::Distro;
    use crate::resources::package::PackageManager::{Apt, Pacman, Snap};
    use crate::resources::test_helpers::MockExecutor;
    use crate::tasks::test_helpers::{TestContext, empty_config};
    use std::path::PathBuf;

    fn ubuntu(executor: MockExecutor) -> TestContext {
        let mut fd = package("fd", &[Apt]);
        fd.alt_names.insert(Apt, "fd-find".to_string());
        let mut config = empty_config(PathBuf::from("/dotfiles"));
        config.packages = vec![
            fd,
            package("spotify", &[Snap]),
            package("git", &[Snap, Apt]),
            package("paru", &[Pacman]),
        ];
        TestContext::with_executor(config, Distro::Ubuntu, executor)
    }

    #[test]
    fn not_applicable_without_batches() {
        let t = TestContext::new(empty_config(PathBuf::from("/dotfiles")), Distro::Ubuntu);
        assert!(!InstallPackages.should_run(&t.ctx));
    }

    #[test]
    fn one_invocation_per_manager() {
        let t = ubuntu(MockExecutor::new());
        assert!(InstallPackages.should_run(&t.ctx));
        assert_eq!(InstallPackages.run(&t.ctx).unwrap(), TaskResult::Ok);
        assert_eq!(
            t.commands(),
            [
                "sudo apt install -y fd-find git",
                "sudo snap install -y spotify"
            ]
        );
        assert!(t.log.contains("Installing apt managed packages: fd-find git"));
    }

    #[test]
    fn failure_stops_before_next_manager() {
        let t = ubuntu(MockExecutor::new().failing("sudo apt"));
        let err = InstallPackages.run(&t.ctx).unwrap_err();
        assert!(err.to_string().contains("Failed executing sudo apt install -y fd-find git"));
        assert_eq!(t.commands(), ["sudo apt install -y fd-find git"]);
    }

    #[test]
    fn dry_run_logs_invocations() {
        let t = ubuntu(MockExecutor::new()).dry_run();
        assert_eq!(InstallPackages.run(&t.ctx).unwrap(), TaskResult::DryRun);
        assert!(t.commands().is_empty());
        assert!(t.log.contains("would run: sudo snap install -y spotify"));
    }
}

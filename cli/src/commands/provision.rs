//! The `provision` command: prompts, plan, tasks and reboot.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::{self, Config};
use crate::error::ExecError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::prompt::{Prompter, Terminal};
use crate::tasks::{self, Context, RunOptions};

/// Run the provisioning command against the real system.
///
/// # Errors
///
/// Returns an error if `HOME` is unset, a prompt loses its input, a manifest
/// cannot be loaded, or any task fails.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<()> {
    let home = config::home_dir()?;
    run_with(cli, log, Arc::new(SystemExecutor), &home, &mut Terminal)
}

/// Run the provisioning command with injected collaborators.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
    cli: &Cli,
    log: &Arc<Logger>,
    executor: Arc<dyn Executor>,
    home: &Path,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    log.info(&format!("Hello, {}", cli.distro));

    let version = option_env!("PROVISION_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&format!("provision {version}"));

    let root = config::resolve_root(cli.root.as_deref(), home);
    log.debug(&format!("dotfiles root: {}", root.display()));

    let preset = match cli.preset {
        Some(preset) => preset,
        None => prompter.select_preset().context("reading preset choice")?,
    };

    log.stage("Loading configuration");
    let config = Config::load(&root, preset)?;
    log.info(&format!(
        "preset {preset}: {} packages declared",
        config.packages.len()
    ));

    let warnings = config.validate();
    if !warnings.is_empty() {
        log.warn(&format!(
            "found {} configuration warning(s):",
            warnings.len()
        ));
        for warning in &warnings {
            log.warn(&format!("  [{}]: {}", warning.item, warning.message));
        }
    }

    let ctx = Context::new(
        config,
        cli.distro,
        Arc::clone(log) as Arc<dyn Log>,
        Arc::clone(&executor),
        home.to_path_buf(),
        cli.dry_run,
        RunOptions {
            update: cli.update,
            shell: cli.shell.clone(),
        },
    );
    log_plan(&ctx);

    let all = tasks::all_tasks();
    let selected = super::select_tasks(&all, &cli.skip, &cli.only);
    super::run_tasks(selected, &ctx, log)?;

    if cli.dry_run || cli.no_reboot_prompt {
        return Ok(());
    }
    if prompter.confirm_reboot().context("reading reboot answer")? {
        reboot(&*executor)?;
    }
    Ok(())
}

/// Run `sudo reboot` on the terminal. A non-zero exit is ignored.
fn reboot(executor: &dyn Executor) -> Result<()> {
    match executor.run("sudo", &["reboot"]) {
        Err(e)
            if !matches!(
                e.downcast_ref::<ExecError>(),
                Some(ExecError::CommandFailed { .. })
            ) =>
        {
            Err(e)
        }
        _ => Ok(()),
    }
}

fn log_plan(ctx: &Context) {
    let plan = &ctx.resolution;
    for batch in &plan.pm_packages {
        ctx.log.debug(&format!(
            "{}: {} package(s)",
            batch.manager,
            batch.names.len()
        ));
    }
    ctx.log.debug(&format!(
        "{} source build(s), {} manual, {} service(s)",
        plan.build_packages.len(),
        plan.manual_packages.len(),
        plan.enable_services.len()
    ));
    for name in &plan.dropped {
        ctx.log.debug(&format!("not available on {}, dropped: {name}", ctx.distro));
    }
}

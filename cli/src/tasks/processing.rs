//! Generic resource processing loop: check state, apply, collect stats.
use anyhow::Result;

use super::context::Context;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use provision_cli::tasks::TaskResult;
///
/// let skipped = TaskResult::Skipped("no services to enable".into());
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task had nothing to do.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

impl TaskResult {
    /// `DryRun` in dry-run mode, otherwise `Ok`.
    #[must_use]
    pub const fn done(ctx: &Context) -> Self {
        if ctx.dry_run { Self::DryRun } else { Self::Ok }
    }
}

/// Counters for tasks that process many items.
///
/// ```
/// use provision_cli::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 3, already_ok: 10 };
/// assert_eq!(stats.summary(false), "3 changed, 10 already ok");
/// assert_eq!(stats.summary(true), "3 would change, 10 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of items changed or applied.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        format!("{} {verb}, {} already ok", self.changed, self.already_ok)
    }

    /// Log the summary and return the appropriate `TaskResult`.
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        TaskResult::done(ctx)
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
    }
}

/// Check each resource and apply those that are missing or incorrect.
///
/// `verb` names the change in log lines ("link", "clone", …). An
/// [`ResourceState::Invalid`] resource stops processing with an error.
///
/// # Errors
///
/// Returns the first error from checking, applying, or an invalid resource.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats += process_single(ctx, &resource, current, verb)?;
    }
    Ok(stats.finish(ctx))
}

/// Process a single resource given its current state, returning a stats delta.
fn process_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    state: ResourceState,
    verb: &str,
) -> Result<TaskStats> {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    match state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {desc}"));
            delta.already_ok += 1;
        }
        ResourceState::Invalid { reason } => {
            anyhow::bail!("cannot {verb} {desc}: {reason}");
        }
        ResourceState::Missing | ResourceState::Incorrect { .. } => {
            if ctx.dry_run {
                let msg = if let ResourceState::Incorrect { current } = &state {
                    format!("would {verb} {desc} (currently {current})")
                } else {
                    format!("would {verb}: {desc}")
                };
                ctx.log.dry_run(&msg);
                delta.changed += 1;
                return Ok(delta);
            }
            match resource.apply()? {
                ResourceChange::Applied => {
                    ctx.log.debug(&format!("{verb}: {desc}"));
                    delta.changed += 1;
                }
                ResourceChange::AlreadyCorrect => delta.already_ok += 1,
            }
        }
    }
    Ok(delta)
}

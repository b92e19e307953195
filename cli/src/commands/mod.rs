//! Task selection and the fail-fast task runner.
pub mod provision;

use anyhow::Result;

use crate::logging::Logger;
use crate::tasks::{self, Context, Task};

/// Select tasks by `--only` and `--skip` (case-insensitive substring match
/// on task names). `--only` takes precedence when both are given.
#[must_use]
pub fn select_tasks<'a>(all: &'a [Box<dyn Task>], skip: &[String], only: &[String]) -> Vec<&'a dyn Task> {
    all.iter()
        .filter(|t| {
            let name = t.name().to_lowercase();
            if !only.is_empty() {
                return only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !skip.is_empty() {
                return !skip.iter().any(|s| name.contains(&s.to_lowercase()));
            }
            true
        })
        .map(AsRef::as_ref)
        .collect()
}

/// Execute tasks in order until one fails, then print the summary.
///
/// # Errors
///
/// Returns the first task failure; later tasks are not run.
pub fn run_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    let outcome = tasks
        .into_iter()
        .try_for_each(|task| tasks::execute(task, ctx));
    log.print_summary();
    outcome
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tasks::all_tasks;

    fn names(tasks: &[&dyn Task]) -> Vec<&'static str> {
        tasks.iter().map(|t| t.name()).collect()
    }

    #[test]
    fn no_filter_keeps_every_task() {
        let all = all_tasks();
        assert_eq!(select_tasks(&all, &[], &[]).len(), all.len());
    }

    #[test]
    fn only_matches_case_insensitive_substrings() {
        let all = all_tasks();
        let selected = select_tasks(&all, &[], &["SYMLINK".to_string(), "shell".to_string()]);
        assert_eq!(names(&selected), ["Install symlinks", "Configure shell"]);
    }

    #[test]
    fn skip_removes_matches() {
        let all = all_tasks();
        let selected = select_tasks(&all, &["packages".to_string()], &[]);
        let selected = names(&selected);
        assert!(!selected.contains(&"Install packages"));
        assert!(selected.contains(&"Update package managers"));
        assert!(!selected.contains(&"Report manual packages"));
        assert!(selected.contains(&"Build from source"));
    }

    #[test]
    fn only_wins_over_skip() {
        let all = all_tasks();
        let selected = select_tasks(&all, &["shell".to_string()], &["shell".to_string()]);
        assert_eq!(names(&selected), ["Configure shell"]);
    }
}

//! Core logging types: task entries, status, and the [`Log`] trait.

/// Task execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable task name.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task does not apply to this distro or was filtered out.
    NotApplicable,
    /// Task was skipped (e.g., nothing to do).
    Skipped,
    /// Task ran in dry-run mode; no changes were applied.
    DryRun,
    /// Task encountered an error and stopped the run.
    Failed,
}

impl TaskStatus {
    /// Word shown for the status in the run summary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "done",
            Self::NotApplicable => "not applicable",
            Self::Skipped => "skipped",
            Self::DryRun => "dry run",
            Self::Failed => "FAILED",
        }
    }
}

/// Abstraction over logging backends.
///
/// Tasks log through this trait so tests can capture output without a
/// terminal or a global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_equality() {
        assert_eq!(TaskStatus::Ok, TaskStatus::Ok);
        assert_ne!(TaskStatus::Ok, TaskStatus::Failed);
        assert_ne!(TaskStatus::Skipped, TaskStatus::DryRun);
        assert_ne!(TaskStatus::NotApplicable, TaskStatus::Ok);
    }

    #[test]
    fn failed_label_stands_out() {
        assert_eq!(TaskStatus::Failed.label(), "FAILED");
        assert_eq!(TaskStatus::Ok.label(), "done");
    }
}

//! Login shell resource.
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A resource for configuring the default login shell.
#[derive(Debug)]
pub struct DefaultShellResource<'a> {
    /// Absolute path of the desired shell (e.g. `/bin/zsh`).
    target_shell: PathBuf,
    /// Current login shell, usually taken from `$SHELL`.
    current_shell: Option<String>,
    /// Executor for running system commands.
    executor: &'a dyn Executor,
}

impl<'a> DefaultShellResource<'a> {
    /// Create a new default shell resource.
    #[must_use]
    pub const fn new(
        target_shell: PathBuf,
        current_shell: Option<String>,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            target_shell,
            current_shell,
            executor,
        }
    }

    /// Create a resource whose current shell is read from `$SHELL`.
    #[must_use]
    pub fn from_env(target_shell: PathBuf, executor: &'a dyn Executor) -> Self {
        let current = std::env::var("SHELL").ok().filter(|s| !s.is_empty());
        Self::new(target_shell, current, executor)
    }
}

impl Applicable for DefaultShellResource<'_> {
    fn description(&self) -> String {
        format!("default shell → {}", self.target_shell.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let shell = self.target_shell.to_string_lossy();
        self.executor.run("chsh", &["-s", &shell])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DefaultShellResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        // `/usr/bin/zsh` and `/bin/zsh` are the same shell on merged-/usr systems.
        if let Some(current) = &self.current_shell
            && Path::new(current).file_name() == self.target_shell.file_name()
        {
            return Ok(ResourceState::Correct);
        }
        if !self.executor.which(&self.target_shell.to_string_lossy()) {
            return Ok(ResourceState::Invalid {
                reason: "shell is not installed".to_string(),
            });
        }
        Ok(self
            .current_shell
            .as_ref()
            .map_or(ResourceState::Missing, |current| ResourceState::Incorrect {
                current: current.clone(),
            }))
    }
}

//! Git clone resource.
use std::path::PathBuf;

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A repository cloned into a fixed directory.
///
/// An existing destination counts as correct; it is never pulled or
/// re-cloned.
#[derive(Debug)]
pub struct GitCloneResource<'a> {
    /// Repository URL.
    pub url: String,
    /// Clone destination.
    pub dest: PathBuf,
    executor: &'a dyn Executor,
}

impl<'a> GitCloneResource<'a> {
    /// Create a new clone resource.
    #[must_use]
    pub fn new(url: impl Into<String>, dest: PathBuf, executor: &'a dyn Executor) -> Self {
        Self {
            url: url.into(),
            dest,
            executor,
        }
    }
}

impl Applicable for GitCloneResource<'_> {
    fn description(&self) -> String {
        format!("{} -> {}", self.url, self.dest.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.dest.exists() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        let dest = self.dest.to_string_lossy();
        self.executor.run("git", &["clone", &self.url, &dest])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for GitCloneResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.dest.exists() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}

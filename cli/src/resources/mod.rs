//! Idempotent resource primitives (check + apply pattern).
pub mod git_repo;
pub mod package;
pub mod shell;
pub mod symlink;

use anyhow::Result;

/// Minimal interface for resources that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Bring the resource into its desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// a failing external command, or a target that must not be replaced.
    fn apply(&self) -> Result<ResourceChange>;
}

/// State of a resource on the system.
///
/// # Examples
///
/// ```
/// use provision_cli::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Incorrect { current: "/bin/bash".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(wrong, missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
    /// Resource cannot be applied (e.g. a real directory sits at a link target).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
}

/// Resources that can determine their own state before applying.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

impl<T: Applicable + ?Sized> Applicable for &T {
    fn description(&self) -> String {
        (**self).description()
    }

    fn apply(&self) -> Result<ResourceChange> {
        (**self).apply()
    }
}

impl<T: Resource + ?Sized> Resource for &T {
    fn current_state(&self) -> Result<ResourceState> {
        (**self).current_state()
    }
}

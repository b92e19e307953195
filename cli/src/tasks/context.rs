//! Shared state handed to every task.
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::distro::Distro;
use crate::exec::Executor;
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::resolver::{self, Resolution};

/// Default login shell.
pub const DEFAULT_SHELL: &str = "/bin/zsh";

/// Per-run switches that tasks consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Refresh package databases before installing.
    pub update: bool,
    /// Login shell to configure.
    pub shell: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            update: false,
            shell: PathBuf::from(DEFAULT_SHELL),
        }
    }
}

/// Shared context for task execution.
pub struct Context {
    /// Loaded manifests and dotfiles root.
    pub config: Config,
    /// Target distribution.
    pub distro: Distro,
    /// Installation plan computed from `config` for `distro`.
    pub resolution: Resolution,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (log commands instead of running them).
    pub dry_run: bool,
    /// User's home directory path.
    pub home: PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Filesystem operation abstraction (injectable for testing).
    pub fs_ops: Arc<dyn FileSystemOps>,
    /// Per-run switches.
    pub options: RunOptions,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("preset", &self.config.preset)
            .field("distro", &self.distro)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &"<dyn Executor>")
            .field("fs_ops", &"<dyn FileSystemOps>")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Create a context, resolving `config`'s packages for `distro`.
    #[must_use]
    pub fn new(
        config: Config,
        distro: Distro,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        home: PathBuf,
        dry_run: bool,
        options: RunOptions,
    ) -> Self {
        let resolution = resolver::resolve(distro, &config.packages);
        Self {
            config,
            distro,
            resolution,
            log,
            dry_run,
            home,
            executor,
            fs_ops: Arc::new(SystemFileSystemOps),
            options,
        }
    }

    /// Directory that source builds are cloned into.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.home.join("build")
    }

    /// Destination for directory entries of the dotfiles config dir.
    #[must_use]
    pub fn xdg_config_dir(&self) -> PathBuf {
        self.home.join(".config")
    }

    /// Create a copy of this context with a different [`FileSystemOps`] implementation.
    #[cfg(test)]
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }
}

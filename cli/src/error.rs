//! Domain-specific error types for the provisioning engine.
//!
//! Library modules return these typed errors; task and command code wraps
//! them in [`anyhow::Error`] via `?` and `.context()`.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError    : HOME lookup, manifest I/O and JSON parsing
//! ExecError      : spawning or running an external command
//! ResourceError  : symlink and other filesystem resources
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while locating and loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The `HOME` environment variable is not set.
    #[error("HOME environment variable is not set")]
    HomeNotSet,

    /// A manifest file could not be read.
    #[error("IO error reading manifest {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A manifest file is not a valid JSON array of package records.
    #[error("malformed manifest {}: {source}", path.display())]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Underlying JSON error (carries line and column).
        source: serde_json::Error,
    },
}

/// Errors that arise from running external commands.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be started at all (not found, not executable).
    #[error("Failed executing {command}: {source}")]
    Spawn {
        /// Full command line.
        command: String,
        /// Underlying I/O error from the spawn.
        source: std::io::Error,
    },

    /// The program ran and exited non-zero (or was killed by a signal).
    #[error("Failed executing {command} (exit {})", exit_label(code))]
    CommandFailed {
        /// Full command line.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },
}

/// Render an exit code for diagnostics; `None` means killed by a signal.
#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Errors that arise from resource operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A real directory occupies a path where a symlink should go.
    #[error("refusing to replace real directory: {}", path.display())]
    RealDirectory {
        /// Path of the directory.
        path: PathBuf,
    },

    /// A filesystem operation on a resource failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was being attempted (e.g. `"remove"`, `"create link"`).
        action: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

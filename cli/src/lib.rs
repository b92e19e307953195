//! Personal-machine provisioning.
//!
//! Resolves a preset's package manifests against the target distribution,
//! then installs, builds, enables services, links dotfiles and sets the
//! login shell, stopping at the first failing command.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load and validate JSON package manifests
//! - **[`resolver`]**: turn declarations into a per-distro installation plan
//! - **[`resources`]**: idempotent `check + apply` primitives (symlinks, clones, shell)
//! - **[`tasks`]**: named, ordered units of work wired to resources
//!
//! [`commands::provision`] ties them together behind the [`cli`].
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod distro;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod prompt;
pub mod resolver;
pub mod resources;
pub mod tasks;

//! Package managers and batched package installation.
use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::exec::Executor;

/// Supported package managers.
///
/// Serialized as the lowercase identifier used in package manifests
/// (`"pacman"`, `"apt"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Official Arch Linux packages.
    Pacman,
    /// AUR helper.
    Yay,
    /// Debian and Ubuntu packages.
    Apt,
    /// Snap store.
    Snap,
    /// Fedora packages.
    Dnf,
}

impl PackageManager {
    /// Program invoked for this manager.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Pacman => "pacman",
            Self::Yay => "yay",
            Self::Apt => "apt",
            Self::Snap => "snap",
            Self::Dnf => "dnf",
        }
    }

    /// Whether the manager must be run through `sudo`.
    ///
    /// `yay` refuses to run as root and escalates on its own.
    #[must_use]
    pub const fn needs_sudo(self) -> bool {
        !matches!(self, Self::Yay)
    }

    /// Arguments placed before the package names on install.
    #[must_use]
    pub const fn install_args(self) -> &'static [&'static str] {
        match self {
            Self::Pacman | Self::Yay => &["-S", "--needed", "--noconfirm"],
            Self::Apt | Self::Snap | Self::Dnf => &["install", "-y"],
        }
    }

    /// Arguments for refreshing the package database, if the manager has one.
    #[must_use]
    pub const fn update_args(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Pacman | Self::Yay => Some(&["-Syu", "--needed", "--noconfirm"]),
            Self::Apt | Self::Dnf => Some(&["update", "-y"]),
            Self::Snap => None,
        }
    }

    /// Full invocation (`program`, `args`) for installing `names`.
    #[must_use]
    pub fn install_invocation<'a>(self, names: &[&'a str]) -> (&'static str, Vec<&'a str>) {
        let mut args: Vec<&'a str> = self.install_args().to_vec();
        args.extend_from_slice(names);
        self.escalate(args)
    }

    /// Full invocation for updating, or `None` if the manager has no update step.
    #[must_use]
    pub fn update_invocation(self) -> Option<(&'static str, Vec<&'static str>)> {
        self.update_args()
            .map(|args| self.escalate(args.to_vec()))
    }

    fn escalate<'a>(self, args: Vec<&'a str>) -> (&'static str, Vec<&'a str>) {
        if self.needs_sudo() {
            let mut full = Vec::with_capacity(args.len() + 1);
            full.push(self.program());
            full.extend(args);
            ("sudo", full)
        } else {
            (self.program(), args)
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Install `names` with a single invocation of `manager`.
///
/// An empty batch is a no-op.
///
/// # Errors
///
/// Returns an error if the package manager exits non-zero.
pub fn batch_install(executor: &dyn Executor, manager: PackageManager, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let (program, args) = manager.install_invocation(&names);
    executor.run(program, &args)?;
    Ok(())
}

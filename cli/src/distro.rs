//! Supported distributions and their package-manager preferences.
use std::fmt;

use crate::resources::package::PackageManager;

/// Target Linux distribution, selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Distro {
    /// Arch Linux (`pacman`, AUR through `yay`).
    Archlinux,
    /// Debian (`apt`).
    Debian,
    /// Ubuntu (`apt`, then `snap`).
    Ubuntu,
    /// Fedora (`dnf`).
    Fedora,
    /// Fedora Asahi Remix for Apple silicon (`dnf`).
    FedoraAsahiRemix,
}

impl Distro {
    /// Package managers usable on this distro, most preferred first.
    ///
    /// The first entry a package lists as available wins.
    #[must_use]
    pub const fn preferred_managers(self) -> &'static [PackageManager] {
        match self {
            Self::Archlinux => &[PackageManager::Pacman, PackageManager::Yay],
            Self::Debian => &[PackageManager::Apt],
            Self::Ubuntu => &[PackageManager::Apt, PackageManager::Snap],
            Self::Fedora | Self::FedoraAsahiRemix => &[PackageManager::Dnf],
        }
    }

    /// Whether AUR packages are installed through `yay` on this distro.
    #[must_use]
    pub const fn uses_aur_helper(self) -> bool {
        matches!(self, Self::Archlinux)
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archlinux => write!(f, "archlinux"),
            Self::Debian => write!(f, "debian"),
            Self::Ubuntu => write!(f, "ubuntu"),
            Self::Fedora => write!(f, "fedora"),
            Self::FedoraAsahiRemix => write!(f, "fedora-asahi-remix"),
        }
    }
}

//! Turns package declarations into a per-distro installation plan.
//!
//! For each package, in input order, the distro's preferred managers are
//! scanned and the first one the package is available under wins. A package
//! with no matching manager falls back to its `from_source` recipe; failing
//! that, a mandatory package is reported for manual installation and an
//! optional one is dropped.
//!
//! Resolution is pure: it never touches the system.
use crate::config::{FromSource, Package};
use crate::distro::Distro;
use crate::resources::package::PackageManager;

/// Package names to install with a single invocation of one manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallBatch {
    /// Manager the batch is installed with.
    pub manager: PackageManager,
    /// Install names (alternate where declared), in declaration order.
    pub names: Vec<String>,
}

/// A package that will be built from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuild {
    /// Canonical name, also the clone directory name under `~/build`.
    pub name: String,
    /// Build recipe.
    pub from_source: FromSource,
}

/// Outcome of resolving a package list against a distro.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// One batch per manager, in the order managers were first chosen.
    pub pm_packages: Vec<InstallBatch>,
    /// Packages to build, keyed by canonical name in first-seen order.
    pub build_packages: Vec<SourceBuild>,
    /// Mandatory packages that must be installed by hand.
    pub manual_packages: Vec<String>,
    /// Services of installed or built packages, in declaration order.
    pub enable_services: Vec<String>,
    /// Optional packages left out entirely on this distro.
    pub dropped: Vec<String>,
}

impl Resolution {
    /// Install names batched for `manager`, if any.
    #[must_use]
    pub fn packages_for(&self, manager: PackageManager) -> Option<&[String]> {
        self.pm_packages
            .iter()
            .find(|batch| batch.manager == manager)
            .map(|batch| batch.names.as_slice())
    }

    /// Build recipe registered under `name`, if any.
    #[must_use]
    pub fn build_for(&self, name: &str) -> Option<&FromSource> {
        self.build_packages
            .iter()
            .find(|build| build.name == name)
            .map(|build| &build.from_source)
    }

    /// Whether the plan has nothing to install, build, report or enable.
    /// Dropped packages do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pm_packages.is_empty()
            && self.build_packages.is_empty()
            && self.manual_packages.is_empty()
            && self.enable_services.is_empty()
    }

    fn push_install(&mut self, manager: PackageManager, name: &str) {
        if let Some(batch) = self.pm_packages.iter_mut().find(|b| b.manager == manager) {
            batch.names.push(name.to_string());
        } else {
            self.pm_packages.push(InstallBatch {
                manager,
                names: vec![name.to_string()],
            });
        }
    }

    fn push_build(&mut self, name: &str, from_source: &FromSource) {
        if let Some(existing) = self.build_packages.iter_mut().find(|b| b.name == name) {
            existing.from_source = from_source.clone();
        } else {
            self.build_packages.push(SourceBuild {
                name: name.to_string(),
                from_source: from_source.clone(),
            });
        }
    }
}

/// Resolve `packages` for `distro`.
#[must_use]
pub fn resolve(distro: Distro, packages: &[Package]) -> Resolution {
    let preferred = distro.preferred_managers();
    let mut resolution = Resolution::default();

    for package in packages {
        let chosen = preferred
            .iter()
            .copied()
            .find(|manager| package.available.contains(manager));

        let installed = if let Some(manager) = chosen {
            resolution.push_install(manager, package.install_name(manager));
            true
        } else if let Some(from_source) = &package.from_source {
            resolution.push_build(&package.canonical_name, from_source);
            true
        } else {
            let bucket = if package.mandatory {
                &mut resolution.manual_packages
            } else {
                &mut resolution.dropped
            };
            bucket.push(package.canonical_name.clone());
            false
        };

        if installed {
            resolution
                .enable_services
                .extend(package.enable_services.iter().cloned());
        }
    }

    resolution
}

//! Locating the dotfiles directory and loading the preset's manifests.
pub mod manifest;
pub mod presets;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub use manifest::{FromSource, Package};
pub use presets::Preset;
pub use validation::ValidationWarning;

/// Directory under the dotfiles root holding the JSON manifests.
pub const PACKAGES_DIR: &str = "packages";

/// Directory under the dotfiles root whose entries are symlinked into place.
pub const CONFIG_DIR: &str = "config";

/// All loaded configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dotfiles repository root.
    pub root: PathBuf,
    /// Selected preset.
    pub preset: Preset,
    /// Packages from every manifest of the preset, in load order.
    pub packages: Vec<Package>,
}

impl Config {
    /// Load every manifest for `preset` from `<root>/packages/`.
    ///
    /// # Errors
    ///
    /// Returns an error if any manifest of the tier is missing or malformed.
    pub fn load(root: &Path, preset: Preset) -> Result<Self, ConfigError> {
        let dir = root.join(PACKAGES_DIR);
        let mut packages = Vec::new();
        for file in preset.manifest_files() {
            packages.extend(manifest::load(&dir.join(file))?);
        }
        Ok(Self {
            root: root.to_path_buf(),
            preset,
            packages,
        })
    }

    /// Source directory for dotfile symlinks.
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Run the non-fatal manifest checks.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validation::validate_packages(&self.packages)
    }
}

/// The user's home directory from `HOME`.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotSet`] if `HOME` is unset or empty.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeNotSet)
}

/// Resolve the dotfiles root: explicit `--root`, then `PROVISION_ROOT`, then
/// `<home>/dotfiles`.
#[must_use]
pub fn resolve_root(explicit: Option<&Path>, home: &Path) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    if let Some(root) = std::env::var_os("PROVISION_ROOT").filter(|r| !r.is_empty()) {
        return PathBuf::from(root);
    }
    home.join("dotfiles")
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn write_manifests(root: &Path, files: &[(&str, &str)]) {
        let dir = root.join(PACKAGES_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            std::fs::write(dir.join(name), content).unwrap();
        }
    }

    #[test]
    fn minimal_loads_only_minimal() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifests(
            tmp.path(),
            &[
                ("minimal.json", r#"[{"canonical_name": "git"}]"#),
                ("server.json", r#"[{"canonical_name": "nginx"}]"#),
            ],
        );
        let config = Config::load(tmp.path(), Preset::Minimal).unwrap();
        let names: Vec<_> = config.packages.iter().map(|p| p.canonical_name.as_str()).collect();
        assert_eq!(names, ["git"]);
    }

    #[test]
    fn desktop_concatenates_all_tiers_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifests(
            tmp.path(),
            &[
                ("minimal.json", r#"[{"canonical_name": "git"}, {"canonical_name": "zsh"}]"#),
                ("server.json", r#"[{"canonical_name": "nginx"}]"#),
                ("desktop.json", r#"[{"canonical_name": "kitty"}]"#),
            ],
        );
        let config = Config::load(tmp.path(), Preset::Desktop).unwrap();
        let names: Vec<_> = config.packages.iter().map(|p| p.canonical_name.as_str()).collect();
        assert_eq!(names, ["git", "zsh", "nginx", "kitty"]);
        assert_eq!(config.preset, Preset::Desktop);
    }

    #[test]
    fn missing_tier_manifest_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifests(tmp.path(), &[("minimal.json", "[]")]);
        let err = Config::load(tmp.path(), Preset::Server).unwrap_err();
        assert!(
            matches!(&err, ConfigError::Io { path, .. } if path.ends_with("server.json")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn config_dir_is_under_root() {
        let config = Config {
            root: PathBuf::from("/home/me/dotfiles"),
            preset: Preset::Minimal,
            packages: vec![],
        };
        assert_eq!(config.config_dir(), PathBuf::from("/home/me/dotfiles/config"));
    }

    #[test]
    fn resolve_root_prefers_explicit() {
        let root = resolve_root(Some(Path::new("/explicit")), Path::new("/home/me"));
        assert_eq!(root, PathBuf::from("/explicit"));
    }
}

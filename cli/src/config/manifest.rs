//! JSON package manifests.
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::resources::package::PackageManager;

/// A package declaration from a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Name used when no alternate is declared, and for builds and reports.
    pub canonical_name: String,
    /// Per-manager alternate names (e.g. `fd` is `fd-find` under apt).
    #[serde(default)]
    pub alt_names: BTreeMap<PackageManager, String>,
    /// Managers that carry this package. Order is not significant.
    #[serde(default)]
    pub available: Vec<PackageManager>,
    /// Fallback build recipe when no available manager applies.
    #[serde(default)]
    pub from_source: Option<FromSource>,
    /// Report for manual installation when it cannot be installed or built.
    #[serde(default)]
    pub mandatory: bool,
    /// Services to enable once the package is installed or built.
    #[serde(default)]
    pub enable_services: Vec<String>,
}

impl Package {
    /// Name to pass to `manager`: the alternate if declared, else canonical.
    #[must_use]
    pub fn install_name(&self, manager: PackageManager) -> &str {
        self.alt_names
            .get(&manager)
            .map_or(self.canonical_name.as_str(), String::as_str)
    }
}

/// Recipe for building a package from source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromSource {
    /// Repository to clone first. Without one the commands run directly.
    #[serde(default)]
    pub git_repo: Option<String>,
    /// Commands (argv vectors) run in order.
    #[serde(default)]
    pub install_commands: Vec<Vec<String>>,
}

/// Load one manifest: a JSON array of [`Package`] records.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not a valid manifest.
pub fn load(path: &Path) -> Result<Vec<Package>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::write_temp_manifest;

    #[test]
    fn load_full_record() {
        let (_dir, path) = write_temp_manifest(
            r#"[
  {
    "canonical_name": "fd",
    "alt_names": { "apt": "fd-find" },
    "available": ["pacman", "apt", "dnf"],
    "from_source": null,
    "mandatory": true,
    "enable_services": []
  },
  {
    "canonical_name": "hyprland",
    "alt_names": {},
    "available": [],
    "from_source": {
      "git_repo": "https://github.com/hyprwm/Hyprland",
      "install_commands": [["make", "all"], ["sudo", "make", "install"]]
    },
    "mandatory": false,
    "enable_services": ["seatd"]
  }
]"#,
        );
        let packages = load(&path).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].install_name(PackageManager::Apt), "fd-find");
        assert_eq!(packages[0].install_name(PackageManager::Pacman), "fd");
        assert!(packages[0].mandatory);

        let build = packages[1].from_source.as_ref().expect("from_source");
        assert_eq!(
            build.git_repo.as_deref(),
            Some("https://github.com/hyprwm/Hyprland")
        );
        assert_eq!(build.install_commands[1], ["sudo", "make", "install"]);
        assert_eq!(packages[1].enable_services, ["seatd"]);
    }

    #[test]
    fn omitted_fields_default() {
        let (_dir, path) = write_temp_manifest(r#"[{ "canonical_name": "git" }]"#);
        let packages = load(&path).unwrap();
        assert!(packages[0].available.is_empty());
        assert!(packages[0].alt_names.is_empty());
        assert!(packages[0].from_source.is_none());
        assert!(!packages[0].mandatory);
    }

    #[test]
    fn from_source_without_repo() {
        let (_dir, path) = write_temp_manifest(
            r#"[{ "canonical_name": "rustup", "from_source": { "git_repo": null, "install_commands": [["sh", "-c", "curl https://sh.rustup.rs | sh"]] } }]"#,
        );
        let packages = load(&path).unwrap();
        let build = packages[0].from_source.as_ref().unwrap();
        assert!(build.git_repo.is_none());
        assert_eq!(build.install_commands.len(), 1);
    }

    #[test]
    fn unknown_manager_is_rejected() {
        let (_dir, path) =
            write_temp_manifest(r#"[{ "canonical_name": "git", "available": ["brew"] }]"#);
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let (_dir, path) = write_temp_manifest("[{ not json");
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("minimal.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

//! Non-fatal manifest checks.
use std::collections::HashSet;

use super::manifest::Package;

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The package the warning is about.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning about `item`.
    #[must_use]
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check loaded packages for declarations that are probably mistakes.
///
/// Reports:
/// - an `alt_names` entry for a manager the package is not available under
/// - a `from_source` recipe with no install commands
/// - a `canonical_name` declared more than once
#[must_use]
pub fn validate_packages(packages: &[Package]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for package in packages {
        let name = &package.canonical_name;

        if !seen.insert(name.as_str()) {
            warnings.push(ValidationWarning::new(name, "declared more than once"));
        }

        for manager in package.alt_names.keys() {
            if !package.available.contains(manager) {
                warnings.push(ValidationWarning::new(
                    name,
                    format!("alt name for {manager}, which is not in available"),
                ));
            }
        }

        if let Some(build) = &package.from_source
            && build.install_commands.is_empty()
        {
            warnings.push(ValidationWarning::new(
                name,
                "from_source has no install commands",
            ));
        }

        if package.canonical_name.trim().is_empty() {
            warnings.push(ValidationWarning::new(name, "empty canonical name"));
        }
    }

    warnings
}

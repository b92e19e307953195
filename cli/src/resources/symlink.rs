//! Symlink resource.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::ResourceError;

/// A symlink resource that can be checked and applied.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Applicable for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => return Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { .. } => {
                return Err(ResourceError::RealDirectory {
                    path: self.target.clone(),
                }
                .into());
            }
            ResourceState::Incorrect { .. } => remove_existing(&self.target)?,
            ResourceState::Missing => {}
        }

        if let Some(parent) = self.target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ResourceError::Io {
                action: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::os::unix::fs::symlink(&self.source, &self.target).map_err(|source| {
            ResourceError::Io {
                action: "create link",
                path: self.target.clone(),
                source,
            }
        })?;

        Ok(ResourceChange::Applied)
    }
}

impl Resource for SymlinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        let Ok(meta) = std::fs::symlink_metadata(&self.target) else {
            return Ok(ResourceState::Missing);
        };

        if meta.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "target is a real directory".to_string(),
            });
        }

        if !meta.is_symlink() {
            return Ok(ResourceState::Incorrect {
                current: "target is a regular file".to_string(),
            });
        }

        let existing = std::fs::read_link(&self.target).map_err(|source| ResourceError::Io {
            action: "read link",
            path: self.target.clone(),
            source,
        })?;
        if existing == self.source {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            })
        }
    }
}

/// Remove a file or symlink occupying a link target.
fn remove_existing(path: &Path) -> Result<(), ResourceError> {
    std::fs::remove_file(path).map_err(|source| ResourceError::Io {
        action: "remove",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn symlink_resource_description() {
        let resource = SymlinkResource::new(PathBuf::from("/source"), PathBuf::from("/target"));
        assert_eq!(resource.description(), "/target -> /source");
    }

    #[test]
    fn missing_when_target_not_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        std::fs::write(&source, "test").unwrap();

        let resource = SymlinkResource::new(source, temp_dir.path().join("target"));
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn correct_when_link_points_to_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "test").unwrap();
        std::os::unix::fs::symlink(&source, &target).unwrap();

        let resource = SymlinkResource::new(source, target);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
        assert_eq!(resource.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn dangling_link_is_incorrect_not_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "test").unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), &target).unwrap();

        let resource = SymlinkResource::new(source.clone(), target.clone());
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
        resource.apply().unwrap();
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
    }

    #[test]
    fn apply_replaces_regular_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "content").unwrap();
        std::fs::write(&target, "other content").unwrap();

        let resource = SymlinkResource::new(source.clone(), target.clone());
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "content");
    }

    #[test]
    fn apply_creates_parent_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("nvim");
        std::fs::create_dir(&source).unwrap();
        let target = temp_dir.path().join(".config").join("nvim");

        SymlinkResource::new(source.clone(), target.clone())
            .apply()
            .unwrap();
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
    }

    #[test]
    fn apply_refuses_real_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::create_dir(&source).unwrap();
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "user data").unwrap();

        let resource = SymlinkResource::new(source, target.clone());
        let err = resource.apply().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::RealDirectory { .. })
        ));
        assert!(target.join("keep").exists(), "directory must be left intact");
    }

    #[test]
    fn apply_twice_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join(".zshrc");
        let target = temp_dir.path().join("home").join(".zshrc");
        std::fs::write(&source, "export EDITOR=nvim").unwrap();

        let resource = SymlinkResource::new(source.clone(), target.clone());
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(resource.apply().unwrap(), ResourceChange::AlreadyCorrect);
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
    }
}

//! Filesystem operation abstractions for dependency injection.
//!
//! Tasks enumerate and prepare directories through [`FileSystemOps`] so their
//! planning logic can be unit-tested without touching the real filesystem.
//! Production code uses [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Abstraction over filesystem queries used by tasks.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns the immediate child paths inside `path`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be opened or read as a directory.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Create `path` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|e| e.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Pre-configure directories and their listings with the builder methods.
/// Directories created through [`FileSystemOps::create_dir_all`] are recorded
/// and reported by [`created`](Self::created).
///
/// ```ignore
/// let fs = MockFileSystemOps::new().with_dir_entries(
///     "/dotfiles/config",
///     vec![PathBuf::from("/dotfiles/config/nvim")],
/// );
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    existing: Vec<PathBuf>,
    dirs: std::collections::HashMap<PathBuf, Vec<PathBuf>>,
    created: std::sync::Mutex<Vec<PathBuf>>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing regular file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        let p = path.into();
        if !self.existing.contains(&p) {
            self.existing.push(p);
        }
        self
    }

    /// Mark `dir` as a directory listing `entries`.
    #[must_use]
    pub fn with_dir_entries(mut self, dir: impl Into<PathBuf>, entries: Vec<PathBuf>) -> Self {
        let d = dir.into();
        if !self.existing.contains(&d) {
            self.existing.push(d.clone());
        }
        self.dirs.insert(d, entries);
        self
    }

    /// Mark `dir` as an empty directory.
    #[must_use]
    pub fn with_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.with_dir_entries(dir, Vec::new())
    }

    /// Directories created so far, in call order.
    #[must_use]
    pub fn created(&self) -> Vec<PathBuf> {
        self.created
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path) || self.created().iter().any(|p| p == path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains_key(path) || self.created().iter().any(|p| p == path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = self
            .dirs
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("mock: no entries configured for {}", path.display()))?;
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        if let Ok(mut guard) = self.created.lock() {
            guard.push(path.to_path_buf());
        }
        Ok(())
    }
}

// Shared helpers for integration tests.
//
// Provides a temporary dotfiles repository plus home directory, a fluent
// builder for populating them, and a recording executor so whole runs can be
// driven without touching the host system.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use provision_cli::config::{Config, Preset};
use provision_cli::exec::{ExecResult, Executor, command_line};

/// Write an empty manifest for every preset tier into `root/packages`.
pub fn setup_minimal_repo(root: &Path) {
    let packages = root.join("packages");
    std::fs::create_dir_all(&packages).expect("create packages dir");
    std::fs::create_dir_all(root.join("config")).expect("create config dir");
    for file in ["minimal.json", "server.json", "desktop.json"] {
        std::fs::write(packages.join(file), "[]").expect("write manifest");
    }
}

/// An isolated dotfiles repository and home directory, both deleted on drop.
pub struct IntegrationTestContext {
    /// Temporary dotfiles repository.
    pub root: tempfile::TempDir,
    /// Temporary home directory.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context with empty manifests and an empty config directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        setup_minimal_repo(root.path());
        Self {
            root,
            home: tempfile::tempdir().expect("create home dir"),
        }
    }

    /// Path to the repository root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Load configuration for `preset`.
    pub fn load_config(&self, preset: Preset) -> Config {
        Config::load(self.root.path(), preset).expect("load config")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context backed by a minimal repository.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Overwrite `packages/<filename>` with `content`.
    pub fn with_manifest(self, filename: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join("packages").join(filename);
        std::fs::write(path, content).expect("write manifest");
        self
    }

    /// Create a directory entry `config/<name>`.
    pub fn with_config_dir(self, name: &str) -> Self {
        let path = self.ctx.root.path().join("config").join(name);
        std::fs::create_dir_all(path).expect("create config entry");
        self
    }

    /// Create a file entry `config/<name>`.
    pub fn with_config_file(self, name: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join("config").join(name);
        std::fs::write(path, content).expect("write config entry");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Executor that records every command line and reports success, except for
/// lines starting with the configured failure prefix.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    lines: Mutex<Vec<String>>,
    fail_prefix: Option<String>,
}

impl RecordingExecutor {
    /// Executor whose commands all succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor failing every command line that starts with `prefix`.
    pub fn failing(prefix: &str) -> Self {
        Self {
            fail_prefix: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    /// Recorded command lines in call order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lock").clone()
    }

    fn record(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let line = command_line(program, args);
        self.lines.lock().expect("lock").push(line.clone());
        if self
            .fail_prefix
            .as_deref()
            .is_some_and(|p| line.starts_with(p))
        {
            anyhow::bail!("Failed executing {line} (exit 1)");
        }
        Ok(ExecResult {
            success: true,
            code: Some(0),
            ..ExecResult::default()
        })
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args)
    }

    fn run_in(&self, _dir: &Path, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args)
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

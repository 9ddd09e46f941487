// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed workspace (source roots, target
// directories, and a config file) and a fluent builder so each integration
// test can set up an isolated environment without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use link_skills::config::{self, Config};

/// An isolated workspace backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding sources, targets, and the config file.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Path to the workspace root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the workspace.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Path of the workspace's `skills_config.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.path(config::DEFAULT_CONFIG_FILE)
    }

    /// Load the workspace configuration.
    pub fn load_config(&self) -> Config {
        config::load(&self.config_path()).expect("load config")
    }

    /// Sorted names of the immediate children of `rel`.
    pub fn children(&self, rel: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path(rel))
            .expect("read dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Contents of the file at `rel`.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("read file")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new, empty workspace.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext {
                root: tempfile::tempdir().expect("create temp dir"),
            },
        }
    }

    /// Create skill `name` under the source root `root` with the given
    /// `(relative path, content)` files.
    pub fn with_skill(self, root: &str, name: &str, files: &[(&str, &str)]) -> Self {
        let dir = self.ctx.path(root).join(name);
        std::fs::create_dir_all(&dir).expect("create skill dir");
        for (rel, content) in files {
            let path = dir.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create skill subdir");
            }
            std::fs::write(&path, content).expect("write skill file");
        }
        self
    }

    /// Write a file at `rel` in the workspace, creating parent directories.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Create an empty directory at `rel` in the workspace.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.ctx.path(rel)).expect("create dir");
        self
    }

    /// Write `content` as the workspace's `skills_config.toml`.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.ctx.config_path(), content).expect("write config file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

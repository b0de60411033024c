//! # projgit CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command
//! gets an isolated, empty configuration file so a developer's own
//! `.projgit.toml` or environment never leaks into a test run.
//!

#![allow(dead_code)]

pub use assert_cmd::Command;
use tempfile::TempDir;

/// Scratch area holding an empty config file and a project tree root.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("projgit.toml"), "").expect("Failed to write config");
        std::fs::create_dir(dir.path().join("projects")).expect("Failed to create base path");
        Self { dir }
    }

    pub fn base(&self) -> std::path::PathBuf {
        self.dir.path().join("projects")
    }

    /// Creates `<base>/<relative>` as a directory chain.
    pub fn mkdirs(&self, relative: &str) {
        std::fs::create_dir_all(self.base().join(relative)).expect("Failed to create dirs");
    }

    /// `projgit` with `--config` and `--base-path` pointing into the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = projgit_cmd();
        cmd.arg("--config")
            .arg(self.dir.path().join("projgit.toml"))
            .arg("--base-path")
            .arg(self.base());
        cmd
    }
}

fn strip_env(cmd: &mut Command) {
    for var in [
        "PROJGIT_CONFIG",
        "PROJGIT_BASE_PATH",
        "APP_KEY",
        "PROJGIT_VALID_IDENTIFIERS",
        "PROJGIT_TOKEN_TTL_HOURS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
}

/// The compiled `projgit` binary with projgit-related environment removed.
pub fn projgit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("projgit").expect("Failed to find projgit binary for testing");
    strip_env(&mut cmd);
    cmd
}

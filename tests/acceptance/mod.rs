//! Acceptance test harness for ogrole
//!
//! Each test gets its own temporary directory for the manifest and state
//! file. Roles created through [`ManagedRole`] are destroyed on drop.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use assert_cmd::prelude::*;
use tempfile::TempDir;

pub mod team_role_tests;

/// Prefix for test roles, matched by `ogrole sweep`
pub const TEST_ROLE_PREFIX: &str = "genietest-";

// ============================================================================
// AcceptanceContext
// ============================================================================

/// Working directory plus the team the tests run against.
pub struct AcceptanceContext {
    pub team_id: String,
    pub binary_path: PathBuf,
    dir: TempDir,
}

impl AcceptanceContext {
    /// Panics unless the API key and team are set.
    pub fn new() -> Self {
        if env::var("OPSGENIE_API_KEY").map_or(true, |k| k.is_empty()) {
            panic!("OPSGENIE_API_KEY must be set for acceptance tests");
        }
        let team_id = env::var("OGROLE_TEST_TEAM_ID")
            .expect("OGROLE_TEST_TEAM_ID must be set for acceptance tests");

        Self {
            team_id,
            binary_path: assert_cmd::cargo::cargo_bin!("ogrole").to_path_buf(),
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir().join("roles.yaml")
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir().join("state.json")
    }

    /// Write a single-role manifest under address `role`.
    pub fn write_manifest(&self, role_name: &str, rights: &[(&str, bool)]) {
        let mut contents = format!(
            "roles:\n  role:\n    team_id: {}\n    role_name: {}\n    rights:\n",
            self.team_id, role_name
        );
        for (right, granted) in rights {
            contents.push_str(&format!(
                "      - right: {}\n        granted: {}\n",
                right, granted
            ));
        }
        fs::write(self.manifest_path(), contents).expect("failed to write manifest");
    }

    pub fn state(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.state_path()).expect("state file missing");
        serde_json::from_str(&raw).expect("state file is not JSON")
    }

    /// Build a Command scoped to this context's state file.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.arg("--state").arg(self.state_path());
        cmd.args(args);
        cmd
    }

    pub fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command(args).assert()
    }

    /// Execute and expect success, returning stdout.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute command");

        if !output.status.success() {
            panic!(
                "Command failed: ogrole {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// `apply -f <manifest> --yes`
    pub fn apply(&self) -> String {
        let manifest = self.manifest_path();
        let manifest = manifest.to_string_lossy();
        self.run_success(&["apply", "-f", &manifest, "--yes"])
    }

    /// ID of the tracked role, if any
    pub fn tracked_id(&self) -> Option<String> {
        if !self.state_path().exists() {
            return None;
        }
        self.state()["resources"]["role"]["id"]
            .as_str()
            .map(str::to_string)
    }
}

// ============================================================================
// ManagedRole
// ============================================================================

/// A role applied through a manifest and destroyed on drop.
pub struct ManagedRole {
    pub ctx: AcceptanceContext,
    pub name: String,
}

impl ManagedRole {
    pub fn apply(rights: &[(&str, bool)]) -> Self {
        let ctx = AcceptanceContext::new();
        let name = test_role_name();
        ctx.write_manifest(&name, rights);
        ctx.apply();
        Self { ctx, name }
    }
}

impl Drop for ManagedRole {
    fn drop(&mut self) {
        let result = self.ctx.command(&["destroy", "--yes"]).output();
        match result {
            Ok(output) if output.status.success() => {
                eprintln!("Cleaned up test role: {}", self.name);
            }
            Ok(output) => {
                eprintln!(
                    "Warning: failed to clean up test role {}: {}",
                    self.name,
                    String::from_utf8_lossy(&output.stderr)
                );
            }
            Err(e) => {
                eprintln!("Warning: failed to run cleanup for {}: {}", self.name, e);
            }
        }
    }
}

/// Unique `genietest-*` role name
pub fn test_role_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("{}{:x}", TEST_ROLE_PREFIX, nanos % 0xffff_ffff)
}

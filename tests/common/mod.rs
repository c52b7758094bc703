//! Shared testing utilities for octorelease CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const API_KEY: &str = "API-INTEGRATION";

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for the compiled binary with connection env vars cleared.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("octorelease").expect("Failed to locate octorelease binary");
        cmd.current_dir(self.work_dir())
            .env_remove("OCTOPUS_SERVER")
            .env_remove("OCTOPUS_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a TOML config file into the work directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir().join("octorelease.toml");
        fs::write(&path, content).expect("Failed to write config file");
        path
    }
}

/// Mock the endpoints every invocation touches before its workflow starts.
#[allow(dead_code)]
pub fn mock_api_root(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("GET", "/api")
        .match_header("X-Octopus-ApiKey", API_KEY)
        .with_status(200)
        .with_body(r#"{"Application":"Octopus Deploy","Version":"2020.1.0"}"#)
        .create()
}

#[allow(dead_code)]
pub fn mock_projects(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("GET", "/api/projects/all")
        .match_header("X-Octopus-ApiKey", API_KEY)
        .with_status(200)
        .with_body(
            r#"[{"Id":"Projects-1","Name":"Checkout","DeploymentProcessId":"deploymentprocess-Projects-1"}]"#,
        )
        .create()
}

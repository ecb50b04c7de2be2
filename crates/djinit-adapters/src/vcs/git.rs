//! `git init` by shelling out to the git binary.

use std::path::Path;
use std::process::Command;

use djinit_core::{
    application::{ApplicationError, ports::VersionControl},
    error::DjinitResult,
};
use tracing::{debug, instrument};

/// Initializes a repository with the `git` executable on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific executable instead of `git`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn init(&self, root: &Path) -> DjinitResult<()> {
        let failed = |reason: String| ApplicationError::VersionControlFailed {
            path: root.to_path_buf(),
            reason,
        };

        let output = Command::new(&self.program)
            .args(["init", "--quiet"])
            .current_dir(root)
            .output()
            .map_err(|e| failed(format!("could not run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!("{} exited with {}: {}", self.program, output.status, stderr.trim())).into());
        }

        debug!("repository initialized");
        Ok(())
    }
}

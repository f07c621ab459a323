//! Build context handed over by PlatformIO.
//!
//! # Layout
//!
//! ```text
//! <project_dir>/
//!   data/                         (LittleFS source tree)
//!   .pio/build/<env>/             (default build_dir)
//!     littlefs.sha256             (stamp)
//! ```
//!
//! Relative paths are resolved the way PlatformIO resolves them: the project
//! directory against the caller's working directory, the build directory
//! against the project directory.

use std::path::{Path, PathBuf};

use crate::error::ContextError;
use crate::types::{HookConfig, UploadPolicy};

/// Name of the LittleFS source directory inside the project.
pub const DATA_DIR_NAME: &str = "data";

/// File name of the stamp inside the build directory.
pub const STAMP_FILE_NAME: &str = "littlefs.sha256";

/// Resolved project dir, build dir and environment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    pub environment: String,
}

impl BuildContext {
    /// Resolve the context from optional build values, rooted at `cwd`.
    ///
    /// - `project_dir` defaults to `cwd`.
    /// - `build_dir` defaults to `<project_dir>/.pio/build/<environment>`.
    /// - `environment` is required and must not be blank.
    pub fn resolve_at(
        cwd: &Path,
        project_dir: Option<&Path>,
        build_dir: Option<&Path>,
        environment: Option<&str>,
    ) -> Result<Self, ContextError> {
        let environment = environment
            .map(str::trim)
            .filter(|env| !env.is_empty())
            .ok_or(ContextError::MissingEnvironment)?
            .to_string();

        let project_dir = match project_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        if !project_dir.is_dir() {
            return Err(ContextError::ProjectDirNotFound { path: project_dir });
        }

        let build_dir = match build_dir {
            Some(dir) => project_dir.join(dir),
            None => default_build_dir(&project_dir, &environment),
        };

        Ok(Self {
            project_dir,
            build_dir,
            environment,
        })
    }

    /// `<project_dir>/data`
    pub fn data_dir(&self) -> PathBuf {
        self.project_dir.join(DATA_DIR_NAME)
    }

    /// `<build_dir>/littlefs.sha256`
    pub fn stamp_path(&self) -> PathBuf {
        self.build_dir.join(STAMP_FILE_NAME)
    }

    /// Hook configuration with the default data dir and stamp locations.
    pub fn hook_config(&self, policy: UploadPolicy, dry_run: bool) -> HookConfig {
        HookConfig {
            data_dir: self.data_dir(),
            stamp_path: self.stamp_path(),
            environment: self.environment.clone(),
            policy,
            dry_run,
        }
    }
}

/// `<project_dir>/.pio/build/<environment>` — pure, no I/O.
pub fn default_build_dir(project_dir: &Path, environment: &str) -> PathBuf {
    project_dir.join(".pio").join("build").join(environment)
}

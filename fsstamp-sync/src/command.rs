//! The filesystem upload step, as an injectable capability.
//!
//! Production code runs `pio run -e <env> -t uploadfs` through
//! [`PioUploadCommand`]; tests pass a closure returning an [`UploadStatus`].

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::error::SyncError;

/// PlatformIO executable used when none is configured.
pub const DEFAULT_PIO_PROGRAM: &str = "pio";

/// PlatformIO target that builds and flashes the LittleFS image.
pub const UPLOADFS_TARGET: &str = "uploadfs";

/// Result code of one upload attempt.
///
/// `code` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStatus {
    code: Option<i32>,
}

impl UploadStatus {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for UploadStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{code}"),
            None => write!(f, "signal"),
        }
    }
}

/// Runs the filesystem upload for a build environment, blocking until done.
pub trait UploadCommand {
    fn upload(&mut self, environment: &str) -> Result<UploadStatus, SyncError>;
}

impl<F> UploadCommand for F
where
    F: FnMut(&str) -> UploadStatus,
{
    fn upload(&mut self, environment: &str) -> Result<UploadStatus, SyncError> {
        Ok(self(environment))
    }
}

/// `pio run -e <env> -t uploadfs`, with inherited stdio.
#[derive(Debug, Clone)]
pub struct PioUploadCommand {
    program: OsString,
    current_dir: Option<PathBuf>,
}

impl PioUploadCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            current_dir: None,
        }
    }

    /// Run PlatformIO from the project directory.
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Arguments passed to the program for `environment`.
    pub fn args(environment: &str) -> [&str; 5] {
        ["run", "-e", environment, "-t", UPLOADFS_TARGET]
    }

    /// Shell-style rendering for logs and error messages.
    pub fn command_line(&self, environment: &str) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in Self::args(environment) {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl Default for PioUploadCommand {
    fn default() -> Self {
        Self::new(DEFAULT_PIO_PROGRAM)
    }
}

impl UploadCommand for PioUploadCommand {
    fn upload(&mut self, environment: &str) -> Result<UploadStatus, SyncError> {
        let command_line = self.command_line(environment);
        let mut command = Command::new(&self.program);
        command.args(Self::args(environment));
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        tracing::info!(command = %command_line, "running upload command");
        let status = command.status().map_err(|source| SyncError::Spawn {
            command: command_line.clone(),
            source,
        })?;
        tracing::debug!(command = %command_line, %status, "upload command finished");
        Ok(status.into())
    }
}

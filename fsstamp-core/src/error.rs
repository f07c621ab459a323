//! Error types for fsstamp-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving the build context handed over by the build tool.
#[derive(Debug, Error)]
pub enum ContextError {
    /// No PlatformIO environment name was supplied (flag or `$PIOENV`).
    #[error("no build environment given; pass --environment or set $PIOENV")]
    MissingEnvironment,

    /// The project directory does not exist or is not a directory.
    #[error("project directory not found at {path}")]
    ProjectDirNotFound { path: PathBuf },
}

/// A stamp or user-supplied string that is not a SHA-256 hex digest.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("expected {expected} hex characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("invalid hex digest: {0}")]
    Hex(#[from] hex::FromHexError),
}

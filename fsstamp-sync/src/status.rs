//! Compare the data directory against the stamp without acting on it.
//!
//! Signal precedence:
//! 1. `NoDataDir` (nothing to upload)
//! 2. `NeverUploaded` (stamp missing or malformed)
//! 3. `Changed` / `Unchanged` (fingerprint comparison)

use fsstamp_core::{Fingerprint, HookConfig, UploadPolicy};

use crate::{hasher, stamp, SyncError};

/// Where the data directory stands relative to the last upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampStatus {
    NoDataDir,
    NeverUploaded {
        current: Fingerprint,
    },
    Unchanged {
        current: Fingerprint,
    },
    Changed {
        current: Fingerprint,
        previous: Fingerprint,
    },
}

impl StampStatus {
    /// Fingerprint of the data directory, if there is one.
    pub fn current(&self) -> Option<&Fingerprint> {
        match self {
            Self::NoDataDir => None,
            Self::NeverUploaded { current }
            | Self::Unchanged { current }
            | Self::Changed { current, .. } => Some(current),
        }
    }

    /// Fingerprint held by the stamp, if any.
    pub fn previous(&self) -> Option<&Fingerprint> {
        match self {
            Self::NoDataDir | Self::NeverUploaded { .. } => None,
            Self::Unchanged { current } => Some(current),
            Self::Changed { previous, .. } => Some(previous),
        }
    }

    /// Whether a hook run under `policy` would invoke the upload command.
    pub fn needs_upload(&self, policy: UploadPolicy) -> bool {
        match self {
            Self::NoDataDir => false,
            Self::Unchanged { .. } => policy == UploadPolicy::Always,
            Self::NeverUploaded { .. } | Self::Changed { .. } => true,
        }
    }
}

/// Fingerprint `config.data_dir` and compare it with `config.stamp_path`.
///
/// A missing data directory is a normal outcome, not an error.
pub fn check(config: &HookConfig) -> Result<StampStatus, SyncError> {
    if !config.data_dir.is_dir() {
        return Ok(StampStatus::NoDataDir);
    }

    let current = hasher::hash_dir(&config.data_dir)?;
    let status = match stamp::read(&config.stamp_path)? {
        None => StampStatus::NeverUploaded { current },
        Some(previous) if previous == current => StampStatus::Unchanged { current },
        Some(previous) => StampStatus::Changed { current, previous },
    };
    Ok(status)
}

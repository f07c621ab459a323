//! Domain types for the LittleFS upload gate.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FingerprintError;

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a hex-encoded SHA-256 digest.
pub const FINGERPRINT_HEX_LEN: usize = DIGEST_LEN * 2;

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Lowercase hex SHA-256 digest identifying the content of a data directory.
///
/// Only constructed from a finished digest or by parsing a validated string,
/// so two values compare equal iff the digests are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap raw digest bytes (the output of a 256-bit hash function).
    pub fn from_digest(digest: &[u8; DIGEST_LEN]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, for status output.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    /// Parse a stored digest. Surrounding whitespace is ignored and upper-case
    /// hex is normalised to lower-case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != FINGERPRINT_HEX_LEN {
            return Err(FingerprintError::Length {
                expected: FINGERPRINT_HEX_LEN,
                actual: trimmed.len(),
            });
        }
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(trimmed, &mut bytes)?;
        Ok(Self::from_digest(&bytes))
    }
}

// ---------------------------------------------------------------------------
// UploadPolicy
// ---------------------------------------------------------------------------

/// Whether an unchanged fingerprint short-circuits the upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPolicy {
    /// Upload only when the fingerprint differs from the stamp.
    #[default]
    WhenChanged,
    /// Upload after every firmware upload; the stamp is still maintained.
    Always,
}

impl fmt::Display for UploadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WhenChanged => write!(f, "when-changed"),
            Self::Always => write!(f, "always"),
        }
    }
}

// ---------------------------------------------------------------------------
// HookConfig
// ---------------------------------------------------------------------------

/// Everything one hook invocation needs, with no ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Directory whose content becomes the LittleFS image.
    pub data_dir: PathBuf,
    /// File holding the last successfully uploaded fingerprint.
    pub stamp_path: PathBuf,
    /// PlatformIO environment passed to `pio run -e`.
    pub environment: String,
    pub policy: UploadPolicy,
    /// Report the decision without running the upload or touching the stamp.
    pub dry_run: bool,
}

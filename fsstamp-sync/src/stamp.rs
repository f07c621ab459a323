//! Stamp store — the fingerprint of the last confirmed LittleFS upload.
//!
//! The stamp is a single text file holding a 64-character hex digest with no
//! trailing newline. Writes go to `<stamp>.tmp` and are renamed into place.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fsstamp_core::Fingerprint;

use crate::error::{io_err, SyncError};

/// Read the stored fingerprint.
///
/// Returns `None` if the stamp does not exist, or if its content is not a
/// valid digest, including non-UTF-8 bytes (logged). Any other read failure
/// is returned as an error.
pub fn read(path: &Path) -> Result<Option<Fingerprint>, SyncError> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(stamp = %path.display(), "no stamp yet");
            return Ok(None);
        }
        Err(err) => return Err(io_err(path, err)),
    };

    let parsed = String::from_utf8(raw)
        .map_err(|err| err.to_string())
        .and_then(|contents| {
            contents
                .parse::<Fingerprint>()
                .map_err(|err| err.to_string())
        });
    match parsed {
        Ok(fingerprint) => Ok(Some(fingerprint)),
        Err(err) => {
            tracing::warn!(
                stamp = %path.display(),
                error = %err,
                "ignoring malformed stamp"
            );
            Ok(None)
        }
    }
}

/// Replace the stored fingerprint, creating the parent directory if needed.
pub fn write(path: &Path, fingerprint: &Fingerprint) -> Result<(), SyncError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }

    let tmp = tmp_path(path);
    std::fs::write(&tmp, fingerprint.as_str()).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::debug!(stamp = %path.display(), %fingerprint, "stamp written");
    Ok(())
}

/// `<stamp>.tmp`, next to the stamp so the rename stays on one filesystem.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

//! Directory fingerprinting.
//!
//! One SHA-256 accumulator is fed, for every regular file, the file's path
//! relative to the root (UTF-8, `/`-separated) followed by its raw bytes.
//! Nothing separates the two.
//!
//! Traversal order is top-down: inside each directory the files come first,
//! sorted by name, then every subdirectory in name order. Symlinks to files
//! are hashed as their target's content; symlinks to directories are not
//! followed.

use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;

use sha2::{Digest, Sha256};
use walkdir::{DirEntry, WalkDir};

use fsstamp_core::types::DIGEST_LEN;
use fsstamp_core::Fingerprint;

use crate::error::{io_err, SyncError};

/// Compute the fingerprint of the tree rooted at `root`.
///
/// The caller checks that `root` is a directory. Any entry that cannot be
/// read fails the whole computation.
pub fn hash_dir(root: &Path) -> Result<Fingerprint, SyncError> {
    let mut hasher = Sha256::new();
    let mut files = 0usize;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by(files_then_dirs);

    for entry in walker {
        let entry = entry.map_err(|source| SyncError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if entry.path_is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping directory symlink");
            continue;
        }

        let key = relative_key(root, path);
        hasher.update(key.as_bytes());
        let mut file = File::open(path).map_err(|e| io_err(path, e))?;
        std::io::copy(&mut file, &mut hasher).map_err(|e| io_err(path, e))?;
        files += 1;
        tracing::trace!(file = %key, "hashed");
    }

    let digest: [u8; DIGEST_LEN] = hasher.finalize().into();
    let fingerprint = Fingerprint::from_digest(&digest);
    tracing::debug!(root = %root.display(), files, %fingerprint, "fingerprinted data dir");
    Ok(fingerprint)
}

fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

//! `fsstamp hash <dir>` — print a directory fingerprint.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use fsstamp_sync::hash_dir;

/// Arguments for `fsstamp hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Directory to fingerprint (usually the project's data/).
    pub dir: PathBuf,
}

impl HashArgs {
    pub fn run(self) -> Result<()> {
        if !self.dir.is_dir() {
            bail!("'{}' is not a directory", self.dir.display());
        }
        let fingerprint = hash_dir(&self.dir)
            .with_context(|| format!("failed to hash '{}'", self.dir.display()))?;
        println!("{fingerprint}");
        Ok(())
    }
}

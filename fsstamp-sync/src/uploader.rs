//! Hash-gated LittleFS upload, run once per firmware upload.
//!
//! ## `ConditionalUploader::run` protocol
//!
//! 1. No data directory → no-op.
//! 2. Fingerprint the data directory.
//! 3. Load the stamp.
//! 4. Identical fingerprints → skip (unless the policy is `Always`).
//! 5. Run the upload command, blocking.
//! 6. Failure → leave the stamp alone so the next run retries.
//! 7. Success → write the new stamp.
//!
//! Every path prints exactly one `>>> Auto:` line before returning, plus the
//! "running uploadfs" line ahead of the upload itself.

use fsstamp_core::{Fingerprint, HookConfig, UploadPolicy};

use crate::command::UploadCommand;
use crate::status::{self, StampStatus};
use crate::{stamp, SyncError};

/// Prefix of every status line printed by the hook.
pub const STATUS_PREFIX: &str = ">>> Auto:";

/// Which path one hook invocation took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// No data directory; nothing was hashed or uploaded.
    NoDataDir,
    /// Fingerprint matches the stamp; upload skipped.
    Unchanged { fingerprint: Fingerprint },
    /// `--dry-run`: the upload *would* have run.
    WouldUpload {
        fingerprint: Fingerprint,
        previous: Option<Fingerprint>,
    },
    /// Upload succeeded. `stamp_written` is false if persisting the stamp
    /// failed; the next run will upload again.
    Uploaded {
        fingerprint: Fingerprint,
        stamp_written: bool,
    },
    /// Upload command failed or could not start; the stamp was not touched.
    UploadFailed {
        fingerprint: Fingerprint,
        code: Option<i32>,
    },
}

/// Orchestrates fingerprint → compare → upload → stamp.
pub struct ConditionalUploader<C> {
    config: HookConfig,
    command: C,
}

impl<C: UploadCommand> ConditionalUploader<C> {
    pub fn new(config: HookConfig, command: C) -> Self {
        Self { config, command }
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Run the hook once.
    ///
    /// Hashing and stamp-read failures are returned as errors. A failed upload
    /// or stamp write is reported through the outcome instead.
    pub fn run(&mut self) -> Result<HookOutcome, SyncError> {
        let env = self.config.environment.clone();
        let status = status::check(&self.config)?;
        tracing::debug!(?status, policy = %self.config.policy, "stamp check");

        let Some(current) = status.current().cloned() else {
            announce("no data/ dir, skipping uploadfs");
            return Ok(HookOutcome::NoDataDir);
        };

        if !status.needs_upload(self.config.policy) {
            announce("LittleFS unchanged, skipping uploadfs");
            return Ok(HookOutcome::Unchanged {
                fingerprint: current,
            });
        }

        let forced = matches!(status, StampStatus::Unchanged { .. })
            && self.config.policy == UploadPolicy::Always;
        let reason = if forced { "unchanged" } else { "changed" };

        if self.config.dry_run {
            announce(&format!(
                "[dry-run] LittleFS {reason}, would run uploadfs for env={env}"
            ));
            return Ok(HookOutcome::WouldUpload {
                previous: status.previous().cloned(),
                fingerprint: current,
            });
        }

        announce(&format!("LittleFS {reason}, running uploadfs for env={env}"));
        let result = match self.command.upload(&env) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "upload command could not run");
                announce(&format!("uploadfs FAILED ({err}), NOT updating stamp"));
                return Ok(HookOutcome::UploadFailed {
                    fingerprint: current,
                    code: None,
                });
            }
        };

        if !result.is_success() {
            tracing::warn!(rc = %result, env = %env, "uploadfs failed");
            announce(&format!("uploadfs FAILED (rc={result}), NOT updating stamp"));
            return Ok(HookOutcome::UploadFailed {
                fingerprint: current,
                code: result.code(),
            });
        }

        let stamp_written = match stamp::write(&self.config.stamp_path, &current) {
            Ok(()) => {
                announce(&format!("uploadfs OK, stamp updated ({current})"));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "uploadfs succeeded but the stamp could not be written");
                announce(&format!("uploadfs OK, stamp NOT updated ({err})"));
                false
            }
        };

        Ok(HookOutcome::Uploaded {
            fingerprint: current,
            stamp_written,
        })
    }
}

fn announce(message: &str) {
    tracing::info!("{message}");
    println!("{STATUS_PREFIX} {message}");
}

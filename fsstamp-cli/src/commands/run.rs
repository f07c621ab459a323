//! `fsstamp run` — the post-upload hook.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fsstamp_core::UploadPolicy;
use fsstamp_sync::{command::DEFAULT_PIO_PROGRAM, ConditionalUploader, PioUploadCommand};

use super::ContextArgs;

/// Arguments for `fsstamp run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Upload even if data/ is unchanged (the stamp is still maintained).
    #[arg(long)]
    pub always: bool,

    /// Report what would happen without uploading or writing the stamp.
    #[arg(long)]
    pub dry_run: bool,

    /// PlatformIO executable.
    #[arg(
        long,
        env = "PLATFORMIO_BIN",
        value_name = "PROGRAM",
        default_value = DEFAULT_PIO_PROGRAM
    )]
    pub pio: PathBuf,
}

impl RunArgs {
    /// A failed upload is printed but still exits 0 so the firmware build
    /// itself is not marked failed; hashing and stamp-read errors exit 1.
    pub fn run(self) -> Result<()> {
        let ctx = self
            .context
            .build_context()
            .context("cannot resolve build context")?;
        let policy = if self.always {
            UploadPolicy::Always
        } else {
            UploadPolicy::WhenChanged
        };
        let config = self.context.hook_config(&ctx, policy, self.dry_run);

        let command = PioUploadCommand::new(self.pio).with_current_dir(&ctx.project_dir);
        let outcome = ConditionalUploader::new(config, command)
            .run()
            .with_context(|| format!("LittleFS hook failed for env '{}'", ctx.environment))?;
        tracing::debug!(?outcome, "hook finished");
        Ok(())
    }
}

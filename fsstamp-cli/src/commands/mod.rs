pub mod hash;
pub mod run;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fsstamp_core::{BuildContext, HookConfig, UploadPolicy};

// ---------------------------------------------------------------------------
// Shared build-context arguments — what PlatformIO knows about the build
// ---------------------------------------------------------------------------

/// Build context flags shared by `run` and `status`.
#[derive(Args, Debug)]
pub struct ContextArgs {
    /// PlatformIO project directory (contains platformio.ini and data/).
    #[arg(long, env = "PROJECT_DIR", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Build output directory; defaults to <project>/.pio/build/<env>.
    #[arg(long, env = "BUILD_DIR", value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// PlatformIO environment name.
    #[arg(long, short = 'e', env = "PIOENV", value_name = "ENV")]
    pub environment: Option<String>,

    /// Override the LittleFS source directory (default: <project>/data);
    /// relative paths are taken from the project directory.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the stamp file (default: <build>/littlefs.sha256); relative
    /// paths are taken from the project directory.
    #[arg(long, value_name = "FILE")]
    pub stamp: Option<PathBuf>,
}

impl ContextArgs {
    /// Resolve the build context against the current directory.
    pub fn build_context(&self) -> Result<BuildContext> {
        let cwd = std::env::current_dir().context("could not determine current directory")?;
        let ctx = BuildContext::resolve_at(
            &cwd,
            self.project_dir.as_deref(),
            self.build_dir.as_deref(),
            self.environment.as_deref(),
        )?;
        Ok(ctx)
    }

    /// Hook configuration with `--data-dir` / `--stamp` overrides applied,
    /// resolved against the project directory like `--build-dir`.
    pub fn hook_config(
        &self,
        ctx: &BuildContext,
        policy: UploadPolicy,
        dry_run: bool,
    ) -> HookConfig {
        let mut config = ctx.hook_config(policy, dry_run);
        if let Some(dir) = &self.data_dir {
            config.data_dir = ctx.project_dir.join(dir);
        }
        if let Some(stamp) = &self.stamp {
            config.stamp_path = ctx.project_dir.join(stamp);
        }
        config
    }
}

//! `fsstamp status` — compare data/ with the last uploaded image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use fsstamp_core::{Fingerprint, UploadPolicy};
use fsstamp_sync::{check, StampStatus};

use super::ContextArgs;

/// Arguments for `fsstamp status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let ctx = self
            .context
            .build_context()
            .context("cannot resolve build context")?;
        let config = self
            .context
            .hook_config(&ctx, UploadPolicy::WhenChanged, true);
        let status = check(&config)
            .with_context(|| format!("status check failed for env '{}'", ctx.environment))?;

        let report = StatusReport {
            environment: ctx.environment,
            data_dir: config.data_dir,
            stamp_path: config.stamp_path,
            status,
        };
        if self.json {
            print_json(&report)?;
            return Ok(());
        }

        print_human(&report);
        Ok(())
    }
}

#[derive(Debug)]
struct StatusReport {
    environment: String,
    data_dir: PathBuf,
    stamp_path: PathBuf,
    status: StampStatus,
}

#[derive(Serialize)]
struct StatusReportJson<'a> {
    environment: &'a str,
    data_dir: String,
    stamp_path: String,
    status: &'static str,
    current: Option<&'a Fingerprint>,
    uploaded: Option<&'a Fingerprint>,
    needs_upload: bool,
}

fn print_json(report: &StatusReport) -> Result<()> {
    let payload = StatusReportJson {
        environment: &report.environment,
        data_dir: report.data_dir.display().to_string(),
        stamp_path: report.stamp_path.display().to_string(),
        status: status_key(&report.status),
        current: report.status.current(),
        uploaded: report.status.previous(),
        needs_upload: report.status.needs_upload(UploadPolicy::WhenChanged),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_human(report: &StatusReport) {
    println!(
        "fsstamp v{} | env={}",
        env!("CARGO_PKG_VERSION"),
        report.environment
    );
    println!("  data dir  {}", report.data_dir.display());
    println!("  stamp     {}", report.stamp_path.display());
    println!("  current   {}", describe(report.status.current()));
    println!("  uploaded  {}", describe(report.status.previous()));
    println!(
        "{} {}  {}",
        status_indicator(&report.status),
        status_label(&report.status),
        status_detail(&report.status)
    );

    if report.status.needs_upload(UploadPolicy::WhenChanged) {
        println!("Run 'fsstamp run' or 'pio run -t upload' to flash the new image.");
    }
}

fn describe(fingerprint: Option<&Fingerprint>) -> String {
    match fingerprint {
        Some(fp) => fp.to_string(),
        None => "-".bright_black().to_string(),
    }
}

fn status_key(status: &StampStatus) -> &'static str {
    match status {
        StampStatus::NoDataDir => "no_data_dir",
        StampStatus::NeverUploaded { .. } => "never_uploaded",
        StampStatus::Unchanged { .. } => "unchanged",
        StampStatus::Changed { .. } => "changed",
    }
}

fn status_label(status: &StampStatus) -> &'static str {
    match status {
        StampStatus::NoDataDir => "NO DATA DIR",
        StampStatus::NeverUploaded { .. } => "NEVER UPLOADED",
        StampStatus::Unchanged { .. } => "UNCHANGED",
        StampStatus::Changed { .. } => "CHANGED",
    }
}

fn status_indicator(status: &StampStatus) -> String {
    match status {
        StampStatus::NoDataDir => "■".bright_black().bold().to_string(),
        StampStatus::NeverUploaded { .. } => "■".yellow().bold().to_string(),
        StampStatus::Unchanged { .. } => "■".green().bold().to_string(),
        StampStatus::Changed { .. } => "■".red().bold().to_string(),
    }
}

fn status_detail(status: &StampStatus) -> String {
    match status {
        StampStatus::NoDataDir => "nothing to upload".to_string(),
        StampStatus::NeverUploaded { .. } => "no stamp from a previous upload".to_string(),
        StampStatus::Unchanged { .. } => "matches the last upload".to_string(),
        StampStatus::Changed { previous, .. } => {
            format!("differs from the last upload ({})", previous.short())
        }
    }
}

use std::fs;
use std::path::Path;

use fsstamp_core::{Fingerprint, HookConfig, UploadPolicy};
use fsstamp_sync::{hash_dir, stamp, ConditionalUploader, HookOutcome, UploadStatus};
use tempfile::TempDir;

const F1: &str = "59cf4ed07faff74096d2be40c3acbdea62c357484b265c8a6d922e2b0ca48602";
const F2: &str = "d2c0380a758962dccfc99369da61cc9600170c752fe17bf451c70e4c7460df39";

fn hook_config(project: &Path) -> HookConfig {
    HookConfig {
        data_dir: project.join("data"),
        stamp_path: project
            .join(".pio")
            .join("build")
            .join("esp32dev")
            .join("littlefs.sha256"),
        environment: "esp32dev".to_string(),
        policy: UploadPolicy::WhenChanged,
        dry_run: false,
    }
}

fn with_data(project: &TempDir, content: &str) -> HookConfig {
    let cfg = hook_config(project.path());
    fs::create_dir_all(&cfg.data_dir).expect("mkdir data");
    fs::write(cfg.data_dir.join("a.txt"), content).expect("write a.txt");
    cfg
}

/// Run the hook with a fake upload that returns `code`, recording calls.
fn run_with_code(cfg: &HookConfig, code: i32, calls: &mut Vec<String>) -> HookOutcome {
    ConditionalUploader::new(cfg.clone(), |env: &str| {
        calls.push(env.to_string());
        UploadStatus::from_code(code)
    })
    .run()
    .expect("hook run")
}

fn stamp_contents(cfg: &HookConfig) -> Option<String> {
    fs::read_to_string(&cfg.stamp_path).ok()
}

fn fp(hex: &str) -> Fingerprint {
    hex.parse().expect("valid fingerprint")
}

#[test]
fn missing_data_dir_is_a_no_op() {
    let project = TempDir::new().expect("project");
    let cfg = hook_config(project.path());
    let mut calls = Vec::new();

    let outcome = run_with_code(&cfg, 0, &mut calls);

    assert_eq!(outcome, HookOutcome::NoDataDir);
    assert!(calls.is_empty(), "no upload without a data dir");
    assert!(!cfg.stamp_path.exists(), "no stamp without a data dir");
}

#[test]
fn unchanged_data_skips_upload_and_stamp_write() {
    let project = TempDir::new().expect("project");
    let cfg = with_data(&project, "hello");
    stamp::write(&cfg.stamp_path, &fp(F1)).expect("seed stamp");
    let mtime_before = fs::metadata(&cfg.stamp_path).and_then(|m| m.modified()).ok();
    let mut calls = Vec::new();

    let outcome = run_with_code(&cfg, 0, &mut calls);

    assert_eq!(outcome, HookOutcome::Unchanged { fingerprint: fp(F1) });
    assert!(calls.is_empty());
    assert_eq!(stamp_contents(&cfg).as_deref(), Some(F1));
    let mtime_after = fs::metadata(&cfg.stamp_path).and_then(|m| m.modified()).ok();
    assert_eq!(mtime_before, mtime_after, "stamp must not be rewritten");
}

#[test]
fn failed_upload_leaves_absent_stamp_absent() {
    let project = TempDir::new().expect("project");
    let cfg = with_data(&project, "hello");
    let mut calls = Vec::new();

    let outcome = run_with_code(&cfg, 1, &mut calls);

    assert_eq!(
        outcome,
        HookOutcome::UploadFailed {
            fingerprint: fp(F1),
            code: Some(1)
        }
    );
    assert_eq!(calls, vec!["esp32dev".to_string()]);
    assert!(!cfg.stamp_path.exists());
}

#[test]
fn failed_upload_leaves_existing_stamp_untouched() {
    let project = TempDir::new().expect("project");
    let cfg = with_data(&project, "hello!");
    stamp::write(&cfg.stamp_path, &fp(F1)).expect("seed stamp");
    let mut calls = Vec::new();

    let outcome = run_with_code(&cfg, 2, &mut calls);

    assert!(matches!(outcome, HookOutcome::UploadFailed { code: Some(2), .. }));
    assert_eq!(stamp_contents(&cfg).as_deref(), Some(F1));
}

#[test]
fn successful_upload_writes_exactly_current_fingerprint() {
    let project = TempDir::new().expect("project");
    let cfg = with_data(&project, "hello");
    let mut calls = Vec::new();

    let outcome = run_with_code(&cfg, 0, &mut calls);

    let current = hash_dir(&cfg.data_dir).expect("hash");
    assert_eq!(
        outcome,
        HookOutcome::Uploaded {
            fingerprint: current.clone(),
            stamp_written: true
        }
    );
    assert_eq!(stamp_contents(&cfg), Some(current.to_string()));
}

#[test]
fn malformed_stamp_forces_upload_and_is_repaired() {
    let project = TempDir::new().expect("project");
    let cfg = with_data(&project, "hello");
    fs::create_dir_all(cfg.stamp_path.parent().expect("parent")).expect("mkdir");
    fs::write(&cfg.stamp_path, "garbage").expect("write garbage");
    let mut calls = Vec::new();

    run_with_code(&cfg, 0, &mut calls);

    assert_eq!(calls.len(), 1);
    assert_eq!(stamp_contents(&cfg).as_deref(), Some(F1));
}

#[test]
fn binary_garbage_stamp_forces_upload_and_is_repaired() {
    let project = TempDir::new().expect("project");
    let cfg = with_data(&project, "hello");
    fs::create_dir_all(cfg.stamp_path.parent().expect("parent")).expect("mkdir");
    fs::write(&cfg.stamp_path, [0xff, 0xfe, 0x00, 0x80]).expect("write binary garbage");
    let mut calls = Vec::new();

    let outcome = run_with_code(&cfg, 0, &mut calls);

    assert_eq!(
        outcome,
        HookOutcome::Uploaded {
            fingerprint: fp(F1),
            stamp_written: true
        }
    );
    assert_eq!(calls.len(), 1);
    assert_eq!(stamp_contents(&cfg).as_deref(), Some(F1));
}

#[test]
fn three_run_scenario() {
    let project = TempDir::new().expect("project");
    let cfg = with_data(&project, "hello");
    let mut calls = Vec::new();

    // Run 1: no stamp, upload succeeds, stamp = F1.
    let first = run_with_code(&cfg, 0, &mut calls);
    assert_eq!(
        first,
        HookOutcome::Uploaded {
            fingerprint: fp(F1),
            stamp_written: true
        }
    );
    assert_eq!(stamp_contents(&cfg).as_deref(), Some(F1));
    assert_eq!(calls.len(), 1);

    // Run 2: same content, upload not invoked.
    let second = run_with_code(&cfg, 0, &mut calls);
    assert_eq!(second, HookOutcome::Unchanged { fingerprint: fp(F1) });
    assert_eq!(calls.len(), 1);

    // Run 3a: edited content, upload fails, stamp stays F1.
    fs::write(cfg.data_dir.join("a.txt"), "hello!").expect("edit a.txt");
    let failed = run_with_code(&cfg, 1, &mut calls);
    assert_eq!(
        failed,
        HookOutcome::UploadFailed {
            fingerprint: fp(F2),
            code: Some(1)
        }
    );
    assert_eq!(stamp_contents(&cfg).as_deref(), Some(F1));
    assert_eq!(calls.len(), 2);

    // Run 3b: retried on the next invocation, succeeds, stamp = F2.
    let retried = run_with_code(&cfg, 0, &mut calls);
    assert_eq!(
        retried,
        HookOutcome::Uploaded {
            fingerprint: fp(F2),
            stamp_written: true
        }
    );
    assert_eq!(stamp_contents(&cfg).as_deref(), Some(F2));
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|env| env == "esp32dev"));
}

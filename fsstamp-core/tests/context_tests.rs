//! Build-context resolution tests.
//!
//! Each `#[case]` gets its own `assert_fs::TempDir` as the working directory.

use assert_fs::prelude::*;
use fsstamp_core::{BuildContext, ContextError, UploadPolicy};
use predicates::prelude::predicate;
use rstest::rstest;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// 1. Environment name
// ---------------------------------------------------------------------------

#[rstest]
#[case::absent(None)]
#[case::empty(Some(""))]
#[case::blank(Some("   "))]
fn missing_environment_is_rejected(#[case] env: Option<&str>) {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let err = BuildContext::resolve_at(cwd.path(), None, None, env).unwrap_err();
    assert!(matches!(err, ContextError::MissingEnvironment), "got: {err}");
    assert!(err.to_string().contains("PIOENV"));
}

#[test]
fn environment_is_trimmed() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let ctx = BuildContext::resolve_at(cwd.path(), None, None, Some(" esp32dev \n")).unwrap();
    assert_eq!(ctx.environment, "esp32dev");
}

// ---------------------------------------------------------------------------
// 2. Directory resolution
// ---------------------------------------------------------------------------

#[rstest]
#[case::defaulted(None, ".pio/build/nodemcu")]
#[case::relative(Some("out"), "out")]
#[case::nested_relative(Some("build/custom"), "build/custom")]
fn build_dir_resolves_against_project(
    #[case] build_dir: Option<&str>,
    #[case] expected_rel: &str,
) {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    cwd.child("proj").create_dir_all().expect("mkdir");

    let ctx = BuildContext::resolve_at(
        cwd.path(),
        Some(Path::new("proj")),
        build_dir.map(Path::new),
        Some("nodemcu"),
    )
    .expect("resolve");

    let project = cwd.path().join("proj");
    assert_eq!(ctx.project_dir, project);
    assert_eq!(ctx.build_dir, project.join(expected_rel));
    assert_eq!(ctx.data_dir(), project.join("data"));
}

#[test]
fn absolute_build_dir_is_kept() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let elsewhere = assert_fs::TempDir::new().expect("tempdir");

    let ctx = BuildContext::resolve_at(
        cwd.path(),
        None,
        Some(elsewhere.path()),
        Some("esp32dev"),
    )
    .expect("resolve");

    assert_eq!(ctx.build_dir, elsewhere.path());
    assert_eq!(ctx.stamp_path(), elsewhere.path().join("littlefs.sha256"));
}

#[test]
fn missing_project_dir_returns_not_found_with_path() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let err = BuildContext::resolve_at(
        cwd.path(),
        Some(Path::new("does-not-exist")),
        None,
        Some("esp32dev"),
    )
    .unwrap_err();

    assert!(matches!(err, ContextError::ProjectDirNotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn project_dir_pointing_at_file_is_rejected() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let file = cwd.child("platformio.ini");
    file.write_str("[env:esp32dev]\n").expect("write");
    file.assert(predicate::path::is_file());

    let err = BuildContext::resolve_at(
        cwd.path(),
        Some(file.path()),
        None,
        Some("esp32dev"),
    )
    .unwrap_err();
    match err {
        ContextError::ProjectDirNotFound { path } => assert_eq!(path, PathBuf::from(file.path())),
        other => panic!("expected ProjectDirNotFound, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 3. Hook configuration
// ---------------------------------------------------------------------------

#[rstest]
#[case(UploadPolicy::WhenChanged, false)]
#[case(UploadPolicy::Always, false)]
#[case(UploadPolicy::WhenChanged, true)]
fn hook_config_is_derived_from_context(#[case] policy: UploadPolicy, #[case] dry_run: bool) {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let ctx = BuildContext::resolve_at(cwd.path(), None, None, Some("esp32dev")).expect("resolve");

    let cfg = ctx.hook_config(policy, dry_run);
    assert_eq!(cfg.data_dir, ctx.data_dir());
    assert_eq!(cfg.stamp_path, ctx.stamp_path());
    assert_eq!(cfg.environment, ctx.environment);
    assert_eq!(cfg.policy, policy);
    assert_eq!(cfg.dry_run, dry_run);

    // Resolution never creates anything on disk.
    cwd.child(".pio").assert(predicate::path::missing());
}

//! # fsstamp-sync
//!
//! Hash-gated LittleFS upload: directory fingerprinting, the stamp store and
//! the conditional uploader.
//!
//! Build a [`ConditionalUploader`] from a [`fsstamp_core::HookConfig`] and an
//! [`UploadCommand`], then call [`ConditionalUploader::run`] once per firmware
//! upload.

pub mod command;
pub mod error;
pub mod hasher;
pub mod stamp;
pub mod status;
pub mod uploader;

pub use command::{PioUploadCommand, UploadCommand, UploadStatus};
pub use error::SyncError;
pub use hasher::hash_dir;
pub use status::{check, StampStatus};
pub use uploader::{ConditionalUploader, HookOutcome, STATUS_PREFIX};

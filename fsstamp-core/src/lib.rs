//! fsstamp core library — domain types, build context, errors.
//!
//! Public API surface:
//! - [`types`] — [`Fingerprint`], [`UploadPolicy`], [`HookConfig`]
//! - [`context`] — [`BuildContext`] resolution from PlatformIO build values
//! - [`error`] — [`ContextError`], [`FingerprintError`]

pub mod context;
pub mod error;
pub mod types;

pub use context::BuildContext;
pub use error::{ContextError, FingerprintError};
pub use types::{Fingerprint, HookConfig, UploadPolicy};

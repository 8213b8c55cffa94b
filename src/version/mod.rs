//! Build version and pre-release status layer
//!
//! This module resolves the version stamp bundled with the toolchain exactly
//! once per process, validates it against the compiled-in pre-release flag,
//! and answers the two questions every other subsystem asks: the exact
//! version of the running binary and whether this build is pre-release.
//!
//! # Modules
//!
//! - [`provider`]: One-time stamp resolution and the two accessors
//! - [`overrides`]: Test-only pre-release override channel
//! - [`error`]: Fatal stamp resolution errors
//! - [`semver`]: Version descriptor helpers

pub mod error;
pub mod overrides;
pub mod provider;
pub mod semver;

pub use error::VersionError;
pub use overrides::{EnvOverrideSource, OverrideSource};
pub use provider::{
    IS_PRE_RELEASE, VersionProvider, VersionResource, is_pre_release, provider, version,
};

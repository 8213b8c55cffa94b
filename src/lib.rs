//! Authoritative build version and pre-release status for toolchain binaries.
//!
//! Every other part of the toolchain asks this crate two questions: what
//! exact version is the running binary, and is this build a pre-release
//! build? The answers come from a version stamp resolved exactly once per
//! process and a compiled-in pre-release flag, exposed through
//! [`version::VersionProvider`].

pub mod config;
pub mod version;

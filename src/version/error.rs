use thiserror::Error;

/// Fatal conditions raised while resolving the build version stamp.
///
/// All three are packaging errors, not runtime conditions: none are retried
/// and there is no fallback value. The enum is `Clone` so the provider can
/// hand the cached failed outcome to every caller racing or following the
/// same initialization.
#[derive(Debug, Clone, Error)]
pub enum VersionError {
    /// Stamp not found or not openable
    #[error("Version stamp {path} is unavailable: {reason}")]
    ResourceUnavailable { path: String, reason: String },

    /// Stamp opened but empty or not readable as UTF-8 text
    #[error("Version stamp {path} is malformed: {reason}")]
    ResourceMalformed { path: String, reason: String },

    /// Pre-release flag set without a `-` qualifier in the stamped version
    #[error(
        "Build is flagged pre-release but version `{version}` has no `-` qualifier; restamp the build or clear the pre-release flag"
    )]
    InvariantViolation { version: String },
}

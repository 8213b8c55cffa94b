//! One-time version stamp resolution and the two accessors

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, error};

use crate::version::error::VersionError;
use crate::version::overrides::{EnvOverrideSource, OverrideSource, parse_override};
use crate::version::semver::has_qualifier;

/// True while the version stream this binary is built from has not shipped
/// as a stable release. Binaries carrying a true flag are rejected by
/// tooling that only trusts stable releases. Flip before and after every
/// release cut.
pub const IS_PRE_RELEASE: bool = true;

/// Bytes of the stamp bundled into the binary at packaging time.
const EMBEDDED_STAMP: &[u8] = include_bytes!("../../resources/build.version");

/// Logical path reported in diagnostics for the embedded stamp.
const EMBEDDED_STAMP_PATH: &str = "resources/build.version";

/// Where the version descriptor bytes come from
#[derive(Debug, Clone)]
pub enum VersionResource {
    /// The stamp compiled into the binary
    Embedded,
    /// An on-disk stamp, e.g. one installed next to the toolchain binary
    File(PathBuf),
}

/// Single source of truth for build version and pre-release status.
///
/// The descriptor is resolved exactly once per provider: every caller,
/// including callers racing the first resolution, observes the same value or
/// the same failure. The pre-release override channel is re-read on every
/// query.
pub struct VersionProvider {
    resource: VersionResource,
    pre_release_flag: bool,
    overrides: Box<dyn OverrideSource>,
    resolved: OnceLock<Result<String, VersionError>>,
}

impl VersionProvider {
    pub fn new(
        resource: VersionResource,
        pre_release_flag: bool,
        overrides: Box<dyn OverrideSource>,
    ) -> Self {
        Self {
            resource,
            pre_release_flag,
            overrides,
            resolved: OnceLock::new(),
        }
    }

    /// The provider configuration shipped in this binary: embedded stamp,
    /// compiled-in flag, environment-backed override channel.
    pub fn embedded() -> Self {
        Self::new(
            VersionResource::Embedded,
            IS_PRE_RELEASE,
            Box::new(EnvOverrideSource),
        )
    }

    /// The stamped version of this build.
    ///
    /// The first call resolves the stamp and checks the pre-release
    /// invariant; later calls return the cached outcome with no I/O. A
    /// resolution failure is cached as well and never retried.
    pub fn version(&self) -> Result<&str, VersionError> {
        match self.resolved.get_or_init(|| self.resolve()) {
            Ok(version) => Ok(version.as_str()),
            Err(err) => Err(err.clone()),
        }
    }

    /// Whether binaries produced by this build must be treated as
    /// pre-release.
    ///
    /// A well-formed value in the override channel wins; otherwise the
    /// compiled-in flag answers. The override channel is re-read on every
    /// call. A provider whose stamp failed to resolve answers neither
    /// question: the initialization failure surfaces here too.
    pub fn is_pre_release(&self) -> Result<bool, VersionError> {
        self.version()?;

        let overridden = self
            .overrides
            .pre_release_override()
            .as_deref()
            .and_then(parse_override);

        Ok(match overridden {
            Some(forced) => forced,
            None => self.pre_release_flag,
        })
    }

    fn resolve(&self) -> Result<String, VersionError> {
        let result = self.read_stamp().and_then(|version| {
            if self.pre_release_flag && !has_qualifier(&version) {
                return Err(VersionError::InvariantViolation { version });
            }
            Ok(version)
        });

        match &result {
            Ok(version) => debug!("Resolved build version {}", version),
            Err(err) => error!("Failed to resolve build version: {}", err),
        }

        result
    }

    fn read_stamp(&self) -> Result<String, VersionError> {
        match &self.resource {
            VersionResource::Embedded => first_line(EMBEDDED_STAMP, EMBEDDED_STAMP_PATH),
            VersionResource::File(path) => read_stamp_file(path),
        }
    }
}

impl Default for VersionProvider {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Read the first line of an on-disk stamp.
///
/// The file handle is released on every exit path, including read failures.
fn read_stamp_file(path: &Path) -> Result<String, VersionError> {
    let file = File::open(path).map_err(|err| VersionError::ResourceUnavailable {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|err| VersionError::ResourceMalformed {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

    trimmed_version(&line, &path.display().to_string())
}

fn first_line(bytes: &[u8], path: &str) -> Result<String, VersionError> {
    let text = std::str::from_utf8(bytes).map_err(|_| VersionError::ResourceMalformed {
        path: path.to_string(),
        reason: "not valid UTF-8 text".to_string(),
    })?;

    trimmed_version(text.lines().next().unwrap_or(""), path)
}

fn trimmed_version(line: &str, path: &str) -> Result<String, VersionError> {
    let version = line.trim();
    if version.is_empty() {
        return Err(VersionError::ResourceMalformed {
            path: path.to_string(),
            reason: "empty version stamp".to_string(),
        });
    }
    Ok(version.to_string())
}

static PROVIDER: OnceLock<VersionProvider> = OnceLock::new();

/// Process-wide default provider.
pub fn provider() -> &'static VersionProvider {
    PROVIDER.get_or_init(VersionProvider::embedded)
}

/// The stamped version of this build, from the process-wide provider.
pub fn version() -> Result<&'static str, VersionError> {
    provider().version()
}

/// Pre-release status of this build, from the process-wide provider.
pub fn is_pre_release() -> Result<bool, VersionError> {
    provider().is_pre_release()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::overrides::MockOverrideSource;

    #[test]
    fn shipped_stamp_satisfies_the_pre_release_invariant() {
        let provider = VersionProvider::embedded();
        let version = provider.version().unwrap();

        assert!(!version.is_empty());
        assert_eq!(has_qualifier(version), IS_PRE_RELEASE);
    }

    #[test]
    fn version_is_identical_across_calls() {
        let provider = VersionProvider::embedded();

        let first = provider.version().unwrap().to_string();
        let second = provider.version().unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn well_formed_override_wins_over_the_compiled_flag() {
        let mut overrides = MockOverrideSource::new();
        overrides
            .expect_pre_release_override()
            .return_const(Some("FALSE".to_string()));

        let provider =
            VersionProvider::new(VersionResource::Embedded, true, Box::new(overrides));
        assert!(!provider.is_pre_release().unwrap());
    }

    #[test]
    fn unrecognized_override_falls_back_to_the_compiled_flag() {
        let mut overrides = MockOverrideSource::new();
        overrides
            .expect_pre_release_override()
            .return_const(Some("maybe".to_string()));

        let provider =
            VersionProvider::new(VersionResource::Embedded, true, Box::new(overrides));
        assert!(provider.is_pre_release().unwrap());
    }

    #[test]
    fn override_channel_is_consulted_on_every_query() {
        let mut overrides = MockOverrideSource::new();
        overrides
            .expect_pre_release_override()
            .times(3)
            .return_const(None);

        let provider =
            VersionProvider::new(VersionResource::Embedded, false, Box::new(overrides));
        for _ in 0..3 {
            assert!(!provider.is_pre_release().unwrap());
        }
    }
}

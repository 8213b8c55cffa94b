//! Test-only pre-release override channel

#[cfg(test)]
use mockall::automock;

use crate::config::PRE_RELEASE_OVERRIDE_ENV;

/// Trait supplying the raw pre-release override value
///
/// The provider consults the source on every query, so a test harness can
/// toggle the override between calls without restarting the process.
#[cfg_attr(test, automock)]
pub trait OverrideSource: Send + Sync {
    /// The raw override value, or None when the channel is unset
    fn pre_release_override(&self) -> Option<String>;
}

/// Default source backed by the process environment
///
/// Reads [`PRE_RELEASE_OVERRIDE_ENV`] fresh on every lookup.
pub struct EnvOverrideSource;

impl OverrideSource for EnvOverrideSource {
    fn pre_release_override(&self) -> Option<String> {
        std::env::var(PRE_RELEASE_OVERRIDE_ENV).ok()
    }
}

/// Interpret a raw override value.
///
/// Only case-insensitive "true"/"false" are recognized; any other value
/// means "no override".
pub fn parse_override(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;

    #[rstest]
    #[case("true", Some(true))]
    #[case("TRUE", Some(true))]
    #[case("True", Some(true))]
    #[case("false", Some(false))]
    #[case("FALSE", Some(false))]
    #[case("False", Some(false))]
    #[case("1", None)] // numeric truthiness is not recognized
    #[case("yes", None)]
    #[case("", None)]
    #[case(" true", None)] // no trimming of the raw value
    fn parse_override_recognizes_boolean_words_only(
        #[case] raw: &str,
        #[case] expected: Option<bool>,
    ) {
        assert_eq!(parse_override(raw), expected);
    }

    #[test]
    #[serial]
    fn env_override_source_reads_the_process_environment() {
        unsafe { std::env::set_var(PRE_RELEASE_OVERRIDE_ENV, "false") };
        assert_eq!(
            EnvOverrideSource.pre_release_override(),
            Some("false".to_string())
        );

        unsafe { std::env::remove_var(PRE_RELEASE_OVERRIDE_ENV) };
        assert_eq!(EnvOverrideSource.pre_release_override(), None);
    }
}

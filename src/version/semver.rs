use semver::Version;

/// Delimiter introducing a qualifier suffix beyond `major.minor.patch`.
///
/// Compatibility gates read its presence as evidence that a version is not a
/// plain stable release.
pub const QUALIFIER_DELIMITER: char = '-';

/// Whether a version descriptor carries a qualifier suffix.
pub fn has_qualifier(version: &str) -> bool {
    version.contains(QUALIFIER_DELIMITER)
}

/// The qualifier suffix of a descriptor, if any.
///
/// Examples:
/// - "1.9.0-dev-123" -> Some("dev-123")
/// - "1.9.0" -> None
pub fn qualifier(version: &str) -> Option<&str> {
    version
        .split_once(QUALIFIER_DELIMITER)
        .map(|(_, qualifier)| qualifier)
}

/// Parse a descriptor into a semver::Version, normalizing partial versions.
///
/// Handles partial cores like "1" or "1.2" by padding with zeros, keeping
/// any qualifier suffix intact. Used for diagnostics only; an unparseable
/// descriptor is not a resolution error.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.9.0-dev-123" -> Version(1, 9, 0) with pre-release "dev-123"
pub fn parse_descriptor(version: &str) -> Option<Version> {
    let (core, qualifier) = match version.split_once(QUALIFIER_DELIMITER) {
        Some((core, qualifier)) => (core, Some(qualifier)),
        None => (version, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => core.to_string(),
    };

    let full = match qualifier {
        Some(qualifier) => format!("{normalized}-{qualifier}"),
        None => normalized,
    };
    Version::parse(&full).ok()
}

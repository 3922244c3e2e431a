//! Version pins for the proxy package and the build tool it wraps

use anyhow::Result;
use semver::{Version, VersionReq};

/// Parse version string, handling a leading `v`
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Caret requirement templates use to depend on a released version
pub fn caret_pin(version_str: &str) -> Result<String> {
    let version = parse_version(version_str)?;
    Ok(format!("^{}", version))
}

/// Warn about a dependency spec that is not a semver requirement
///
/// Tags (`latest`), URLs and workspace protocols are legal in a manifest but
/// are copied blindly, so the caller should say so.
pub fn check_pin(package: &str, spec: &str) -> Option<String> {
    match VersionReq::parse(spec) {
        Ok(_) => None,
        Err(_) => Some(format!(
            "'{}' is pinned to '{}', which is not a semver range; it was copied as-is",
            package, spec
        )),
    }
}

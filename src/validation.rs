//! Field validation for Windows package options
//!
//! [`validate_windows_options`] reports every problem at once so the caller
//! can show the whole list instead of making the user fix fields one by one.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::options::WindowsPackageOptions;

const MAX_NAME_LEN: usize = 256;
/// Longest package identity name Windows accepts
pub(crate) const MAX_PACKAGE_ID_LEN: usize = 50;
const PACKAGE_ID_LEN: std::ops::RangeInclusive<usize> = 3..=MAX_PACKAGE_ID_LEN;

/// A single failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error: String,
}

impl ValidationError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

/// Check all fields; an empty list means the options can be submitted
pub fn validate_windows_options(options: &WindowsPackageOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut fail = |msg: &str| errors.push(ValidationError::new(msg));

    let name = options.name.trim();
    if name.is_empty() {
        fail("Name is required.");
    } else if name.chars().count() > MAX_NAME_LEN {
        fail("Name must be 256 characters or fewer.");
    }

    check_package_id(&options.package_id, &mut fail);
    check_url(&options.url, "URL", &mut fail);
    check_url(&options.manifest_url, "Manifest URL", &mut fail);

    let version = match PackageVersion::parse(&options.version) {
        Some(v) if v.major == 0 => {
            fail("Version must not start with 0.");
            None
        }
        Some(v) => Some(v),
        None => {
            fail("Version must be in the form major.minor.build, e.g. 1.0.1.");
            None
        }
    };

    let classic = &options.classic_package;
    if classic.generate {
        match PackageVersion::parse(&classic.version) {
            None => fail("Classic package version must be in the form major.minor.build."),
            Some(cv) => {
                if version.is_some_and(|v| cv.cmp(&v) != Ordering::Less) {
                    fail("Classic package version must be lower than the app version.");
                }
            }
        }
        check_url(&classic.url, "Classic package URL", &mut fail);
    }

    if options.publisher.display_name.trim().is_empty() {
        fail("Publisher display name is required.");
    }
    let common_name = options.publisher.common_name.trim();
    if common_name.is_empty() {
        fail("Publisher ID is required.");
    } else if !common_name.starts_with("CN=") {
        fail("Publisher ID must start with CN=.");
    }

    if !(0.0..=1.0).contains(&options.images.padding) {
        fail("Image padding must be between 0 and 1.");
    }
    let base_image = options.images.base_image.trim();
    if !base_image.is_empty() && !is_resolvable_image(base_image, &options.manifest_url) {
        fail("Base image must be an absolute URL or a path relative to the manifest.");
    }

    if !options.generate_modern_package && !classic.generate && !options.edge_html_package.generate
    {
        fail("At least one package type must be generated.");
    }

    errors
}

fn check_package_id(package_id: &str, fail: &mut impl FnMut(&str)) {
    if package_id.is_empty() {
        fail("Package ID is required.");
        return;
    }
    if !PACKAGE_ID_LEN.contains(&package_id.len()) {
        fail("Package ID must be between 3 and 50 characters.");
    }
    if !package_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        fail("Package ID may contain only letters, numbers, periods and dashes.");
    }
    let edge = |c: char| c == '.' || c == '-';
    if package_id.starts_with(edge) || package_id.ends_with(edge) {
        fail("Package ID must not start or end with a period or dash.");
    }
}

fn check_url(value: &str, label: &str, fail: &mut impl FnMut(&str)) {
    let value = value.trim();
    if value.is_empty() {
        fail(&format!("{} is required.", label));
    } else if !is_http_url(value) {
        fail(&format!("{} must be an absolute http or https URL.", label));
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

fn is_resolvable_image(src: &str, manifest_url: &str) -> bool {
    if let Ok(absolute) = url::Url::parse(src) {
        return matches!(absolute.scheme(), "http" | "https" | "data");
    }
    url::Url::parse(manifest_url.trim())
        .and_then(|base| base.join(src))
        .is_ok()
}

/// Four-part package version; the revision defaults to 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PackageVersion {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl PackageVersion {
    /// Parse "major.minor.build" or "major.minor.build.revision"
    pub fn parse(s: &str) -> Option<Self> {
        let parts = s
            .trim()
            .split('.')
            .map(|p| p.parse::<u16>().ok())
            .collect::<Option<Vec<_>>>()?;
        match parts[..] {
            [major, minor, build] => Some(Self {
                major,
                minor,
                build,
                revision: 0,
            }),
            [major, minor, build, revision] => Some(Self {
                major,
                minor,
                build,
                revision,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        assert_eq!(
            PackageVersion::parse("1.0.1"),
            Some(PackageVersion {
                major: 1,
                minor: 0,
                build: 1,
                revision: 0
            })
        );
        assert!(PackageVersion::parse("1.2.3.4").is_some());
        assert!(PackageVersion::parse("1.0").is_none());
        assert!(PackageVersion::parse("1.0.x").is_none());
        assert!(PackageVersion::parse("1.0.70000").is_none());
        assert!(PackageVersion::parse("").is_none());
    }

    #[test]
    fn test_version_ordering() {
        let classic = PackageVersion::parse("1.0.0").unwrap();
        let main = PackageVersion::parse("1.0.1").unwrap();
        assert!(classic < main);
        assert!(PackageVersion::parse("1.0.0.1").unwrap() > classic);
    }

    #[test]
    fn test_package_id_rules() {
        let mut errors = Vec::new();
        let mut fail = |m: &str| errors.push(m.to_string());
        check_package_id("com.example", &mut fail);
        check_package_id("ab", &mut fail);
        check_package_id("-com.example", &mut fail);
        check_package_id("com_example", &mut fail);
        assert_eq!(
            errors,
            vec![
                "Package ID must be between 3 and 50 characters.",
                "Package ID must not start or end with a period or dash.",
                "Package ID may contain only letters, numbers, periods and dashes.",
            ]
        );
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com/"));
        assert!(is_http_url("http://localhost:8080/app"));
        assert!(!is_http_url("ftp://example.com/"));
        assert!(!is_http_url("/relative"));
    }

    #[test]
    fn test_resolvable_image() {
        let manifest_url = "https://example.com/manifest.json";
        assert!(is_resolvable_image("/icons/512.png", manifest_url));
        assert!(is_resolvable_image("https://cdn.example.com/a.png", manifest_url));
        assert!(!is_resolvable_image("icons/a.png", ""));
        assert!(!is_resolvable_image("file:///etc/passwd", manifest_url));
    }
}

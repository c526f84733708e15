//! Version token parsing and the compatibility policy.
//!
//! Platform versions are four dotted numbers, `generation.major.minor.build`
//! (`8.3.24.1`). Compatibility is decided on the release line
//! (generation, major, minor); the build number is ignored.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

/// Leading components that identify a release line: generation, major, minor.
const RELEASE_LINE_COMPONENTS: usize = 3;

static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("version token pattern is a valid regex")
});

/// Find the first four-part dotted version in `text`.
pub fn extract_version_token(text: &str) -> Option<&str> {
    VERSION_TOKEN.find(text).map(|m| m.as_str())
}

/// Decide whether a detected version satisfies a required one.
///
/// Rules, first match wins:
/// 1. unknown detected version is accepted
/// 2. identical strings are accepted
/// 3. when both have at least four components, the release line
///    (`8.3.24` of `8.3.24.1`) must match
/// 4. anything else is rejected
pub fn is_version_compatible(detected: Option<&str>, required: &str) -> bool {
    let Some(detected) = detected else {
        return true;
    };

    if detected == required {
        return true;
    }

    let detected_parts: Vec<&str> = detected.split('.').collect();
    let required_parts: Vec<&str> = required.split('.').collect();

    if detected_parts.len() >= 4 && required_parts.len() >= 4 {
        let n = RELEASE_LINE_COMPONENTS;
        return detected_parts[..n] == required_parts[..n];
    }

    false
}

/// Order two version strings component by component.
///
/// Numeric components compare numerically; a numeric component sorts before
/// a non-numeric one, and non-numeric components compare as text. A version
/// that is a prefix of another sorts first.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(ln), Ok(rn)) => ln.cmp(&rn),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

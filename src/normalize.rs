//! Profile reference normalization.
//!
//! Turns any user-supplied profile reference (bare handle, `@handle`, or a
//! full profile URL) into a canonical `ProfileHandle`. Purely syntactic: no
//! lookup is performed to confirm the profile exists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ExtractError;
use crate::models::ProfileHandle;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Full profile URL: "(https://)?(www.)?tiktok.com/@<handle>", trailing
/// path/query ignored.
static PROFILE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?tiktok\.com/@([^/?\s]+)(?:[/?].*)?$").unwrap()
});

/// Bare handle shape: alphanumeric, underscore, period.
static BARE_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").unwrap());

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Normalize a free-form profile reference into a canonical handle.
///
/// Accepted shapes, checked in order: profile URL, `@handle`, bare handle.
/// Fails with `InvalidProfileReference` when the extracted handle is empty
/// or still contains `/` or whitespace.
pub fn normalize(raw: &str) -> Result<ProfileHandle, ExtractError> {
    let reference = raw.trim();
    if reference.is_empty() {
        return Err(ExtractError::InvalidProfileReference(
            "empty profile reference".to_string(),
        ));
    }

    let candidate = if let Some(caps) = PROFILE_URL.captures(reference) {
        caps[1].to_string()
    } else if let Some(stripped) = reference.strip_prefix('@') {
        stripped.to_string()
    } else if BARE_HANDLE.is_match(reference) {
        reference.to_string()
    } else {
        return Err(ExtractError::InvalidProfileReference(reference.to_string()));
    };

    if candidate.is_empty()
        || candidate.contains('/')
        || candidate.chars().any(char::is_whitespace)
    {
        return Err(ExtractError::InvalidProfileReference(reference.to_string()));
    }

    Ok(ProfileHandle::new(candidate))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shapes_yield_same_handle() {
        let shapes = [
            "dance_star",
            "@dance_star",
            "tiktok.com/@dance_star",
            "www.tiktok.com/@dance_star",
            "https://tiktok.com/@dance_star",
            "https://www.tiktok.com/@dance_star",
        ];
        for shape in shapes {
            let handle = normalize(shape).unwrap();
            assert_eq!(handle.as_str(), "dance_star", "shape: {shape}");
        }
    }

    #[test]
    fn test_url_trailing_path_and_query_ignored() {
        let handle = normalize("https://www.tiktok.com/@dance_star?lang=en").unwrap();
        assert_eq!(handle.as_str(), "dance_star");

        let handle = normalize("https://www.tiktok.com/@dance_star/video/123").unwrap();
        assert_eq!(handle.as_str(), "dance_star");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let handle = normalize("  @dance_star \n").unwrap();
        assert_eq!(handle.as_str(), "dance_star");
    }

    #[test]
    fn test_handle_with_period_and_digits() {
        let handle = normalize("user.name99").unwrap();
        assert_eq!(handle.as_str(), "user.name99");
    }

    #[test]
    fn test_malformed_references_rejected() {
        let malformed = [
            "",
            "   ",
            "@",
            "has space",
            "@has space",
            "slash/inside",
            "https://example.com/@someone",
            "https://tiktok.com/no_marker",
        ];
        for reference in malformed {
            let result = normalize(reference);
            assert!(
                matches!(result, Err(ExtractError::InvalidProfileReference(_))),
                "expected rejection for: {reference:?}"
            );
        }
    }
}

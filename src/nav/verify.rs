//! Verification-route parsing.
//!
//! Visiting `/verify/<token>` fires exactly one verification request at
//! page load; the path is never re-examined on later in-page navigation.

/// Extracts the verification token from a navigation path.
///
/// Matches the two-segment `/verify/<token>` route shape; anything else
/// yields `None`.
pub fn verification_token(path: &str) -> Option<&str> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    if segments.next()? != "verify" {
        return None;
    }
    let token = segments.next()?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_path_yields_token() {
        assert_eq!(verification_token("/verify/abc123"), Some("abc123"));
    }

    #[test]
    fn test_other_paths_yield_nothing() {
        assert_eq!(verification_token("/node/5"), None);
        assert_eq!(verification_token("/"), None);
        assert_eq!(verification_token(""), None);
        assert_eq!(verification_token("/verify"), None);
        assert_eq!(verification_token("/verify/"), None);
    }
}

//! Path helpers shared by policy validation and the gate.

use super::error::PolicyError;

/// Canonical form of a request path, as the browser would resolve it.
///
/// Query and fragment are dropped, percent-escapes decoded, `\` treated as
/// `/`, empty and `.` segments removed and `..` applied. `..` never climbs
/// above the root. `"/"` stays `"/"`.
pub fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let raw = &path[..end];
    let decoded = urlencoding::decode(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Segment-aware prefix test: `/sales` covers `/sales` and `/sales/x`,
/// not `/salesforce`. The root prefix covers everything.
pub fn is_under(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Accept only canonical absolute in-app paths.
///
/// A configured path must be exactly what the browser ends up requesting,
/// otherwise a redirect to it lands somewhere the policy never checked.
pub fn validate_in_app(path: &str) -> Result<(), PolicyError> {
    let invalid = !path.starts_with('/')
        || path.contains("://")
        || path.contains(['?', '#', '\\', '%'])
        || path.chars().any(char::is_whitespace)
        || normalize(path) != path;
    if invalid {
        return Err(PolicyError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/sales/"), "/sales");
        assert_eq!(normalize("/sales/orders/view?page=2"), "/sales/orders/view");
        assert_eq!(normalize("/production#top"), "/production");
        assert_eq!(normalize("/?next=/sales"), "/");
    }

    #[test]
    fn test_normalize_resolves_like_a_browser() {
        assert_eq!(normalize("/sales/../production/dashboard"), "/production/dashboard");
        assert_eq!(normalize("/sales/./orders/view"), "/sales/orders/view");
        assert_eq!(normalize("//production//dashboard"), "/production/dashboard");
        assert_eq!(normalize("/../../production"), "/production");
        assert_eq!(normalize("/%70roduction/dashboard"), "/production/dashboard");
        assert_eq!(normalize("/sales/%2e%2e/production"), "/production");
        assert_eq!(normalize("/sales/..%2Fproduction"), "/production");
        assert_eq!(normalize("\\production\\dashboard"), "/production/dashboard");
    }

    #[test]
    fn test_is_under_respects_segments() {
        assert!(is_under("/sales", "/sales"));
        assert!(is_under("/sales/orders/view", "/sales"));
        assert!(!is_under("/salesforce", "/sales"));
        assert!(!is_under("/", "/sales"));
        assert!(is_under("/anything", "/"));
    }

    #[test]
    fn test_validate_in_app() {
        assert!(validate_in_app("/").is_ok());
        assert!(validate_in_app("/warehouse/dashboard").is_ok());
        for bad in [
            "",
            "warehouse",
            "//evil.com",
            "https://evil.com",
            "/a/",
            "/a?b",
            "/a b",
            "/sales/../production",
            "/sales/./dashboard",
            "/%70roduction",
            "/a\\b",
        ] {
            assert!(validate_in_app(bad).is_err(), "{bad} should be rejected");
        }
    }
}

use regex::Regex;

fn absolute_url_pattern() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https?://").expect("invalid http(s) regex"))
}

/// Determine whether a file reference is already an absolute `http(s)` URL.
///
/// Only the literal scheme prefix is checked; hosts are never validated. The prefix is
/// matched case-sensitively, so `HTTP://host/a.png` is handled as a relative path.
pub fn is_absolute_url(value: &str) -> bool {
    absolute_url_pattern().is_match(value)
}

#[cfg(test)]
mod tests {
    use super::is_absolute_url;

    #[test]
    fn detects_http_and_https() {
        assert!(is_absolute_url("http://localhost:8001/api/files/a.png"));
        assert!(is_absolute_url("https://cdn.example.com/pic.png"));
    }

    #[test]
    fn scheme_prefix_is_case_sensitive() {
        assert!(!is_absolute_url("HTTPS://cdn.example.com/pic.png"));
    }

    #[test]
    fn rejects_other_schemes_and_paths() {
        assert!(!is_absolute_url("ftp://example.com/a.png"));
        assert!(!is_absolute_url("/api/files/a.png"));
        assert!(!is_absolute_url("a.png"));
        assert!(!is_absolute_url("see http://example.com"));
    }
}

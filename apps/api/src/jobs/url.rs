use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const LINKEDIN_JOB_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search";

/// Everything except RFC 3986 unreserved characters gets encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encoded ", " placed between keywords.
const KEYWORD_SEPARATOR: &str = "%2C%20";

/// Builds `{base}?keywords=...&location=...`.
///
/// Keywords are trimmed, blanks dropped, each percent-encoded and joined with
/// an encoded comma-space.
pub fn build_search_url(base: &str, keywords: &[String], location: &str) -> String {
    let keywords = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| utf8_percent_encode(k, QUERY_VALUE).to_string())
        .collect::<Vec<_>>()
        .join(KEYWORD_SEPARATOR);
    let location = utf8_percent_encode(location.trim(), QUERY_VALUE);

    format!("{base}?keywords={keywords}&location={location}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_multiple_keywords_joined_with_encoded_comma() {
        let url = build_search_url(
            LINKEDIN_JOB_SEARCH_URL,
            &kw(&["Data Scientist", "ML Engineer"]),
            "India",
        );
        assert!(url.contains("keywords=Data%20Scientist%2C%20ML%20Engineer&location=India"));
        assert!(url.starts_with("https://www.linkedin.com/jobs/search?"));
    }

    #[test]
    fn test_keywords_are_trimmed_and_blanks_dropped() {
        let url = build_search_url("https://example.test/s", &kw(&[" Rust ", "", "  "]), "Berlin");
        assert_eq!(url, "https://example.test/s?keywords=Rust&location=Berlin");
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let url = build_search_url("https://example.test/s", &kw(&["C++ & C#"]), "São Paulo");
        assert_eq!(
            url,
            "https://example.test/s?keywords=C%2B%2B%20%26%20C%23&location=S%C3%A3o%20Paulo"
        );
    }
}

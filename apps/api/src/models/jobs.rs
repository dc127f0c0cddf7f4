use serde::{Deserialize, Serialize};

/// A parsed job search request.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSearchQuery {
    pub keywords: Vec<String>,
    pub location: String,
    pub max_results: usize,
}

impl JobSearchQuery {
    /// Splits a comma-separated title string into trimmed, non-blank keywords.
    pub fn parse_keywords(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect()
    }
}

/// One scraped search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub link: String,
}

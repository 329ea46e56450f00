use serde::{Deserialize, Serialize};

use super::Player;

/// One page of results from `/search/players`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// The zero-based page this response covers
    pub page: u64,
    /// Number of results on this page
    pub results: u64,
    /// Number of results across all pages
    pub total_results: u64,
    /// Page size the server used
    pub max_results_per_page: u64,
    /// The players on this page
    pub data: Vec<Player>,
}

impl SearchPage {
    /// Whether pages beyond this one exist
    #[must_use]
    pub const fn has_more(&self) -> bool {
        (self.page + 1) * self.max_results_per_page < self.total_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination() {
        let page: SearchPage = serde_json::from_str(
            r#"{"page":0,"results":10,"totalResults":24,"maxResultsPerPage":10,"data":[]}"#,
        )
        .unwrap();
        assert!(page.has_more());

        let last: SearchPage = serde_json::from_str(
            r#"{"page":2,"results":4,"totalResults":24,"maxResultsPerPage":10,"data":[]}"#,
        )
        .unwrap();
        assert!(!last.has_more());
    }
}

//! End-of-run summary record.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Summary record emitted exactly once at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Total number of posts forwarded to the sink.
    pub total_posts: usize,
    /// Number of subreddits the run was configured with, including ones
    /// that failed mid-fetch.
    pub subreddits_scraped: usize,
    /// The search query, absent when none was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// Completion time, ISO-8601 UTC.
    pub timestamp: String,
}

impl RunSummary {
    /// Creates a summary stamped with the current time.
    pub fn new(total_posts: usize, subreddits_scraped: usize, search_query: Option<String>) -> Self {
        Self {
            total_posts,
            subreddits_scraped,
            search_query,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_camel_case_keys() {
        let summary = RunSummary::new(3, 2, Some("rust".to_string()));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["totalPosts"], 3);
        assert_eq!(json["subredditsScraped"], 2);
        assert_eq!(json["searchQuery"], "rust");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn absent_search_query_is_omitted() {
        let summary = RunSummary::new(0, 1, None);
        let json = serde_json::to_value(&summary).unwrap();

        assert!(json.get("searchQuery").is_none());
    }
}

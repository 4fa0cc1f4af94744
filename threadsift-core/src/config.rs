//! Run configuration.
//!
//! The configuration is consumed exactly once at startup, either from a JSON
//! input file or from CLI flags. Validation happens before any network
//! activity; a run with an invalid configuration never makes a request.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{Sort, TimeFilter};

/// Default posts per subreddit/search.
pub const DEFAULT_LIMIT: i64 = 25;
/// Default comments fetched per post when enrichment is enabled.
pub const DEFAULT_MAX_COMMENTS: i64 = 10;
/// Seconds to wait between subreddit fetches.
pub const DELAY_BETWEEN_SUBREDDITS_SECS: f64 = 1.0;

/// Input configuration for one scraper run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Subreddits to fetch listings from.
    #[serde(default, alias = "communities")]
    pub subreddits: Vec<String>,
    /// Site-wide search query; empty when unused.
    #[serde(default)]
    pub search_query: String,
    /// Sort order for listings and search.
    #[serde(default)]
    pub sort_by: Sort,
    /// Time window, applied only when `sort_by` is `top`.
    #[serde(default)]
    pub time_filter: TimeFilter,
    /// Maximum posts per subreddit/search, `[1, 100]`.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Whether to fetch and attach comments to each post.
    #[serde(default)]
    pub include_comments: bool,
    /// Cap on comments fetched per post.
    #[serde(default = "default_max_comments")]
    pub max_comments_per_post: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_max_comments() -> i64 {
    DEFAULT_MAX_COMMENTS
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            subreddits: Vec::new(),
            search_query: String::new(),
            sort_by: Sort::default(),
            time_filter: TimeFilter::default(),
            limit: DEFAULT_LIMIT,
            include_comments: false,
            max_comments_per_post: DEFAULT_MAX_COMMENTS,
        }
    }
}

impl RunConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// Unknown sort or time-filter values are rejected here, before
    /// [`validate`](Self::validate) runs.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the configuration.
    ///
    /// Requires at least one source (subreddits or a search query) and a
    /// `limit` within `[1, 100]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.subreddits.is_empty() && self.search_query.is_empty() {
            return Err(CoreError::InvalidConfig(
                "Either 'subreddits' or 'searchQuery' must be provided".to_string(),
            ));
        }

        if self.limit < 1 || self.limit > 100 {
            return Err(CoreError::InvalidConfig(
                "limit must be an integer between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

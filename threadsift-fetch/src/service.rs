//! The three fetch operations.
//!
//! [`RedditService`] orchestrates URL building, the retry client, and
//! normalization. Each operation is fault-isolated: any upstream failure
//! degrades to an empty result with a logged warning, never an error that
//! escapes this layer. The [`PostSource`] trait is the seam the runner
//! consumes, so orchestration can be tested against a fake.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use threadsift_core::{Comment, Post, Sort, SourceKind, TimeFilter};

use crate::client::{GetOutcome, HttpTransport, RetryClient, Transport};
use crate::error::FetchError;
use crate::normalize::{normalize_comment, normalize_post};
use crate::url;

/// Comment-tree node kind marking a genuine comment (as opposed to a
/// "load more" placeholder).
const COMMENT_KIND: &str = "t1";

/// Body sentinel for deleted comments.
const DELETED_BODY: &str = "[deleted]";

/// Source of posts and comments, as seen by the orchestrator.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetches one page of posts from a subreddit listing.
    async fn subreddit_posts(
        &self,
        subreddit: &str,
        sort: Sort,
        time_filter: TimeFilter,
        limit: i64,
    ) -> Result<Vec<Post>, FetchError>;

    /// Fetches one page of site-wide search results.
    async fn search_posts(
        &self,
        query: &str,
        sort: Sort,
        limit: i64,
    ) -> Result<Vec<Post>, FetchError>;

    /// Fetches up to `max_comments` top-level comments for a post.
    async fn post_comments(
        &self,
        post_id: &str,
        subreddit: &str,
        max_comments: i64,
    ) -> Result<Vec<Comment>, FetchError>;
}

/// Fetch service for Reddit's public JSON API (no authentication).
pub struct RedditService {
    client: RetryClient,
}

impl RedditService {
    /// Creates a service with a real HTTP transport and the default retry
    /// policy.
    pub fn new() -> Result<Self, FetchError> {
        let transport = HttpTransport::new()?;
        info!("Reddit service initialized (free, no authentication required)");
        Ok(Self {
            client: RetryClient::new(transport),
        })
    }

    /// Creates a service over a custom transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            client: RetryClient::new(transport),
        }
    }

    /// Replaces the retry client, keeping its policy.
    pub fn with_client(client: RetryClient) -> Self {
        Self { client }
    }

    /// Fetches posts from a subreddit listing.
    ///
    /// Returns an empty vec on any upstream failure or malformed response.
    pub async fn subreddit_posts(
        &self,
        subreddit: &str,
        sort: Sort,
        time_filter: TimeFilter,
        limit: i64,
    ) -> Vec<Post> {
        let name = url::clean_subreddit_name(subreddit);
        let request_url = url::subreddit_listing_url(&name, sort, time_filter, limit);
        debug!(subreddit = %name, url = %request_url, "Fetching posts");

        match self.client.get(&request_url).await {
            GetOutcome::Success { body } => {
                let posts = body.as_ref().map_or_else(Vec::new, |data| {
                    listing_posts(data, SourceKind::Subreddit, &name)
                });
                info!(count = posts.len(), subreddit = %name, "Fetched posts");
                posts
            }
            GetOutcome::HttpError { status, .. } => {
                warn!(status, subreddit = %name, "Reddit API returned error status");
                Vec::new()
            }
            GetOutcome::TransportExhausted => {
                warn!(subreddit = %name, "Gave up fetching posts after retries");
                Vec::new()
            }
        }
    }

    /// Searches Reddit for posts matching a query.
    ///
    /// Returns an empty vec on any upstream failure or malformed response.
    pub async fn search_posts(&self, query: &str, sort: Sort, limit: i64) -> Vec<Post> {
        let request_url = url::search_url(query, sort, limit);
        debug!(query = %query, url = %request_url, "Searching posts");

        match self.client.get(&request_url).await {
            GetOutcome::Success { body } => {
                let posts = body.as_ref().map_or_else(Vec::new, |data| {
                    listing_posts(data, SourceKind::Search, query)
                });
                info!(count = posts.len(), query = %query, "Search complete");
                posts
            }
            GetOutcome::HttpError { status, .. } => {
                warn!(status, query = %query, "Reddit search API returned error status");
                Vec::new()
            }
            GetOutcome::TransportExhausted => {
                warn!(query = %query, "Gave up searching after retries");
                Vec::new()
            }
        }
    }

    /// Fetches top-level comments for a post.
    ///
    /// Short-circuits without a network call when `max_comments <= 0`.
    /// "Load more" placeholders and deleted/empty bodies are excluded.
    pub async fn post_comments(
        &self,
        post_id: &str,
        subreddit: &str,
        max_comments: i64,
    ) -> Vec<Comment> {
        if max_comments <= 0 {
            return Vec::new();
        }

        let request_url = url::comments_url(subreddit, post_id, max_comments);
        debug!(post_id = %post_id, max_comments, url = %request_url, "Fetching comments");

        match self.client.get(&request_url).await {
            GetOutcome::Success { body } => {
                let comments = body
                    .as_ref()
                    .map_or_else(Vec::new, |data| thread_comments(data, post_id, max_comments));
                debug!(count = comments.len(), post_id = %post_id, "Fetched comments");
                comments
            }
            GetOutcome::HttpError { status, .. } => {
                warn!(status, post_id = %post_id, "Failed to fetch comments");
                Vec::new()
            }
            GetOutcome::TransportExhausted => {
                warn!(post_id = %post_id, "Gave up fetching comments after retries");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl PostSource for RedditService {
    async fn subreddit_posts(
        &self,
        subreddit: &str,
        sort: Sort,
        time_filter: TimeFilter,
        limit: i64,
    ) -> Result<Vec<Post>, FetchError> {
        Ok(Self::subreddit_posts(self, subreddit, sort, time_filter, limit).await)
    }

    async fn search_posts(
        &self,
        query: &str,
        sort: Sort,
        limit: i64,
    ) -> Result<Vec<Post>, FetchError> {
        Ok(Self::search_posts(self, query, sort, limit).await)
    }

    async fn post_comments(
        &self,
        post_id: &str,
        subreddit: &str,
        max_comments: i64,
    ) -> Result<Vec<Comment>, FetchError> {
        Ok(Self::post_comments(self, post_id, subreddit, max_comments).await)
    }
}

/// Walks a listing body (`data.children`) defensively; missing keys yield
/// an empty vec, not an error.
fn listing_posts(body: &Value, source_type: SourceKind, source_name: &str) -> Vec<Post> {
    body.get("data")
        .and_then(|data| data.get("children"))
        .and_then(Value::as_array)
        .map_or_else(Vec::new, |children| {
            children
                .iter()
                .map(|child| {
                    let raw = child.get("data").unwrap_or(&Value::Null);
                    normalize_post(raw, source_type, source_name)
                })
                .collect()
        })
}

/// Extracts comments from a thread body.
///
/// The comments endpoint returns a 2-element array `[post envelope,
/// comments envelope]`; shorter arrays mean "no comments". Children are
/// truncated to `max_comments` before filtering, matching the upstream
/// page-size semantics.
fn thread_comments(body: &Value, post_id: &str, max_comments: i64) -> Vec<Comment> {
    let Some(envelope) = body.as_array().filter(|parts| parts.len() > 1) else {
        return Vec::new();
    };

    let children = envelope[1]
        .get("data")
        .and_then(|data| data.get("children"))
        .and_then(Value::as_array);

    let Some(children) = children else {
        return Vec::new();
    };

    children
        .iter()
        .take(usize::try_from(max_comments).unwrap_or(0))
        .filter_map(|child| {
            let raw = child.get("data").unwrap_or(&Value::Null);
            let kind = child.get("kind").and_then(Value::as_str);
            let comment_body = raw.get("body").and_then(Value::as_str).unwrap_or("");

            if kind == Some(COMMENT_KIND)
                && !comment_body.is_empty()
                && comment_body != DELETED_BODY
            {
                Some(normalize_comment(raw, post_id))
            } else {
                None
            }
        })
        .collect()
}

//! Request URL construction.
//!
//! Pure and total: bad inputs are cleaned or clamped, never rejected. The
//! upstream API caps every page at 100 items, so limits are clamped into
//! `[1, 100]` here regardless of what the caller asks for.

use threadsift_core::{Sort, TimeFilter};
use url::form_urlencoded;

/// Base URL for the public JSON API. `old.reddit.com` is more reliable for
/// unauthenticated JSON access than the main domain.
pub const BASE_URL: &str = "https://old.reddit.com";

/// Canonical domain used for permalinks in output records.
pub const CANONICAL_URL: &str = "https://reddit.com";

/// Browser-style User-Agent; the API 403s generic client strings.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Upstream cap on items per request.
pub const MAX_ITEMS_PER_REQUEST: i64 = 100;

fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_ITEMS_PER_REQUEST)
}

/// Strips surrounding whitespace and any leading `r/` prefixes from a
/// subreddit name.
///
/// Only whole `r/` occurrences are removed: `"rr/rust"` keeps its first `r`
/// rather than being over-stripped character by character.
pub fn clean_subreddit_name(name: &str) -> String {
    let mut cleaned = name.trim();
    while let Some(rest) = cleaned.strip_prefix("r/") {
        cleaned = rest;
    }
    cleaned.to_string()
}

/// Builds the listing URL for a subreddit.
///
/// The time filter is appended only for the `top` sort; other sorts ignore
/// it.
pub fn subreddit_listing_url(
    subreddit: &str,
    sort: Sort,
    time_filter: TimeFilter,
    limit: i64,
) -> String {
    let name = clean_subreddit_name(subreddit);
    let mut url = format!(
        "{BASE_URL}/r/{name}/{}.json?limit={}",
        sort.as_str(),
        clamp_limit(limit)
    );

    if sort == Sort::Top {
        url.push_str("&t=");
        url.push_str(time_filter.as_str());
    }

    url
}

/// Builds the site-wide search URL. The query is percent-encoded.
pub fn search_url(query: &str, sort: Sort, limit: i64) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!(
        "{BASE_URL}/search.json?q={encoded}&limit={}&sort={}",
        clamp_limit(limit),
        sort.as_str()
    )
}

/// Builds the comment-thread URL for a post.
///
/// Callers are responsible for short-circuiting when their comment cap is
/// `<= 0`; this function still clamps into `[1, 100]`.
pub fn comments_url(subreddit: &str, post_id: &str, max_comments: i64) -> String {
    let name = clean_subreddit_name(subreddit);
    format!(
        "{BASE_URL}/r/{name}/comments/{post_id}.json?limit={}",
        clamp_limit(max_comments)
    )
}

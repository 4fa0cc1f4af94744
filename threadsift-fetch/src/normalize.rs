//! Normalization of raw upstream JSON into stable records.
//!
//! Every function here is total: any shape of input, including an empty
//! object, produces a fully populated record. Fields are read through
//! default-providing lookups, never direct indexing.

use chrono::{DateTime, Utc};
use serde_json::Value;
use threadsift_core::{Comment, Post, SourceKind};

use crate::url::CANONICAL_URL;

/// Sentinel used for missing or removed authors.
pub const DELETED_AUTHOR: &str = "[deleted]";

fn str_or(raw: &Value, key: &str, default: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn i64_or(raw: &Value, key: &str) -> i64 {
    raw.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn f64_or(raw: &Value, key: &str) -> f64 {
    raw.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn bool_or(raw: &Value, key: &str) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Renders an epoch timestamp as ISO-8601 UTC.
///
/// Epoch 0 renders as `1970-01-01T00:00:00+00:00`; timestamps outside
/// chrono's representable range fall back to the same epoch-0 rendering.
pub fn format_timestamp(epoch: f64) -> String {
    let secs = epoch.div_euclid(1.0) as i64;
    let nanos = (epoch.rem_euclid(1.0) * 1e9) as u32;

    DateTime::<Utc>::from_timestamp(secs, nanos)
        .unwrap_or_default()
        .to_rfc3339()
}

/// Normalizes one raw post object.
///
/// `source_name` doubles as the subreddit fallback: listing responses always
/// carry a `subreddit` field, but a degenerate record still gets attributed
/// to the subreddit it was requested from.
pub fn normalize_post(raw: &Value, source_type: SourceKind, source_name: &str) -> Post {
    let created_utc = f64_or(raw, "created_utc");

    Post {
        id: str_or(raw, "id", ""),
        title: str_or(raw, "title", ""),
        selftext: str_or(raw, "selftext", ""),
        author: str_or(raw, "author", DELETED_AUTHOR),
        subreddit: str_or(raw, "subreddit", source_name),
        score: i64_or(raw, "score"),
        upvote_ratio: f64_or(raw, "upvote_ratio"),
        num_comments: i64_or(raw, "num_comments"),
        created_utc,
        created_at: format_timestamp(created_utc),
        url: str_or(raw, "url", ""),
        permalink: format!("{CANONICAL_URL}{}", str_or(raw, "permalink", "")),
        is_self: bool_or(raw, "is_self"),
        is_video: bool_or(raw, "is_video"),
        thumbnail: str_or(raw, "thumbnail", ""),
        domain: str_or(raw, "domain", ""),
        source_type,
        source_name: source_name.to_string(),
        comments: None,
    }
}

/// Normalizes one raw comment object, keyed back to its post.
pub fn normalize_comment(raw: &Value, post_id: &str) -> Comment {
    let created_utc = f64_or(raw, "created_utc");

    Comment {
        id: str_or(raw, "id", ""),
        author: str_or(raw, "author", DELETED_AUTHOR),
        body: str_or(raw, "body", ""),
        score: i64_or(raw, "score"),
        created_utc,
        created_at: format_timestamp(created_utc),
        permalink: format!("{CANONICAL_URL}{}", str_or(raw, "permalink", "")),
        is_submitter: bool_or(raw, "is_submitter"),
        parent_id: str_or(raw, "parent_id", ""),
        post_id: post_id.to_string(),
    }
}

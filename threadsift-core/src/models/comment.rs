//! Comment-related types.

use serde::{Deserialize, Serialize};

/// One normalized top-level reply.
///
/// Empty and `"[deleted]"` bodies are filtered out by the fetch layer before
/// normalization, so a `Comment` that reaches the sink always carries text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Platform-assigned id, empty when absent upstream.
    pub id: String,
    /// Author name, `"[deleted]"` when missing or removed.
    pub author: String,
    /// Comment text.
    pub body: String,
    /// Net score; may be negative.
    pub score: i64,
    /// Creation time as seconds since the Unix epoch, `0` when unavailable.
    pub created_utc: f64,
    /// Creation time rendered as an ISO-8601 UTC timestamp.
    pub created_at: String,
    /// Absolute permalink on the platform's canonical domain.
    pub permalink: String,
    /// True when the comment author is the post author.
    pub is_submitter: bool,
    /// Platform thread-pointer string (e.g. `t3_abc123`).
    pub parent_id: String,
    /// Join key back to the owning post; not an ownership relation.
    pub post_id: String,
}

//! Post-related types.
//!
//! A [`Post`] is one normalized Reddit submission. The field set mirrors the
//! flat record schema the output sink receives: every value is already
//! defaulted and derived (ISO timestamp, absolute permalink) by the time a
//! `Post` exists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::comment::Comment;
use crate::error::CoreError;

// ============================================================================
// Sort & Time Filter
// ============================================================================

/// Listing/search sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    /// Newest first.
    #[default]
    New,
    /// Currently trending.
    Hot,
    /// Highest scored within a time window.
    Top,
    /// Rising in activity.
    Rising,
}

impl Sort {
    /// Returns the query-path segment for this sort order.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Hot => "hot",
            Self::Top => "top",
            Self::Rising => "rising",
        }
    }
}

impl FromStr for Sort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "hot" => Ok(Self::Hot),
            "top" => Ok(Self::Top),
            "rising" => Ok(Self::Rising),
            other => Err(CoreError::InvalidConfig(format!(
                "Invalid sortBy: {other}. Must be one of: new, hot, top, rising"
            ))),
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window restricting the `top` sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    /// Past hour.
    Hour,
    /// Past day.
    #[default]
    Day,
    /// Past week.
    Week,
    /// Past month.
    Month,
    /// Past year.
    Year,
    /// All time.
    All,
}

impl TimeFilter {
    /// Returns the `t=` query parameter value for this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

impl FromStr for TimeFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            other => Err(CoreError::InvalidConfig(format!(
                "Invalid timeFilter: {other}. Must be one of: hour, day, week, month, year, all"
            ))),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Source Kind
// ============================================================================

/// How a post was obtained: a subreddit listing or a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Fetched from a subreddit listing endpoint.
    Subreddit,
    /// Returned by the site-wide search endpoint.
    Search,
}

impl SourceKind {
    /// Returns the wire value used in the output records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subreddit => "subreddit",
            Self::Search => "search",
        }
    }
}

// ============================================================================
// Post
// ============================================================================

/// One normalized Reddit submission.
///
/// Built exactly once by the normalizer from a single raw upstream object and
/// never mutated afterward, except that `comments` is populated once by the
/// orchestrator when comment enrichment is enabled.
///
/// Post ids are not deduplicated: the same id can appear under two sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Platform-assigned id, empty when absent upstream.
    pub id: String,
    /// Submission title.
    pub title: String,
    /// Body text; empty for link posts.
    pub selftext: String,
    /// Author name, `"[deleted]"` when missing or removed.
    pub author: String,
    /// Subreddit the post lives in.
    pub subreddit: String,
    /// Net score; may be negative.
    pub score: i64,
    /// Upvote ratio in `[0.0, 1.0]`, `0` when unavailable.
    pub upvote_ratio: f64,
    /// Number of comments reported upstream.
    pub num_comments: i64,
    /// Creation time as seconds since the Unix epoch, `0` when unavailable.
    pub created_utc: f64,
    /// Creation time rendered as an ISO-8601 UTC timestamp.
    pub created_at: String,
    /// External or self link.
    pub url: String,
    /// Absolute permalink on the platform's canonical domain.
    pub permalink: String,
    /// True for text (self) posts.
    pub is_self: bool,
    /// True for video posts.
    pub is_video: bool,
    /// Thumbnail URL or platform sentinel, possibly empty.
    pub thumbnail: String,
    /// Link domain.
    pub domain: String,
    /// Which endpoint produced this record.
    pub source_type: SourceKind,
    /// Queried subreddit name or search query string.
    pub source_name: String,
    /// Top-level comments, present only when enrichment was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_round_trips_through_str() {
        for s in ["new", "hot", "top", "rising"] {
            assert_eq!(s.parse::<Sort>().unwrap().as_str(), s);
        }
        assert!("best".parse::<Sort>().is_err());
    }

    #[test]
    fn time_filter_rejects_unknown_values() {
        assert!("week".parse::<TimeFilter>().is_ok());
        assert!("fortnight".parse::<TimeFilter>().is_err());
    }

    #[test]
    fn source_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SourceKind::Subreddit).unwrap(),
            "\"subreddit\""
        );
        assert_eq!(
            serde_json::to_string(&SourceKind::Search).unwrap(),
            "\"search\""
        );
    }
}

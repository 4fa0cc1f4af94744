//! Output sinks.
//!
//! The run forwards each post to a [`RecordSink`] as it is produced, then
//! pushes exactly one summary record. Delivery is append-only and
//! at-least-once; nothing is deduplicated.

pub mod csv;

use anyhow::Result;
use std::io::Write;

use threadsift_core::{Post, RunSummary};

/// Append-only record stream.
pub trait RecordSink {
    /// Appends one normalized post (with attached comments, if any).
    fn push_post(&mut self, post: &Post) -> Result<()>;

    /// Appends the end-of-run summary record.
    fn push_summary(&mut self, summary: &RunSummary) -> Result<()>;
}

/// Sink writing newline-delimited JSON to any writer.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_line<T: serde::Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

impl<W: Write> RecordSink for JsonlSink<W> {
    fn push_post(&mut self, post: &Post) -> Result<()> {
        self.write_line(post)
    }

    fn push_summary(&mut self, summary: &RunSummary) -> Result<()> {
        self.write_line(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadsift_core::SourceKind;

    fn sample_post() -> Post {
        Post {
            id: "abc".to_string(),
            title: "Hello".to_string(),
            selftext: String::new(),
            author: "alice".to_string(),
            subreddit: "rust".to_string(),
            score: 1,
            upvote_ratio: 0.5,
            num_comments: 0,
            created_utc: 0.0,
            created_at: "1970-01-01T00:00:00+00:00".to_string(),
            url: String::new(),
            permalink: "https://reddit.com/r/rust/comments/abc/".to_string(),
            is_self: true,
            is_video: false,
            thumbnail: String::new(),
            domain: "self.rust".to_string(),
            source_type: SourceKind::Subreddit,
            source_name: "rust".to_string(),
            comments: None,
        }
    }

    #[test]
    fn writes_one_json_object_per_line() {
        let mut buffer = Vec::new();
        {
            let mut sink = JsonlSink::new(&mut buffer);
            sink.push_post(&sample_post()).unwrap();
            sink.push_summary(&RunSummary::new(1, 1, None)).unwrap();
        }

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let post: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(post["id"], "abc");
        // No comments field when enrichment never ran.
        assert!(post.get("comments").is_none());

        let summary: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(summary["totalPosts"], 1);
    }
}

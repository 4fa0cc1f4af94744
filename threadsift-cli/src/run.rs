//! Run orchestration.
//!
//! Sequences per-subreddit fetches with a politeness delay, optionally
//! enriches posts with comments, and forwards every record to the output
//! sink. One failing subreddit never aborts the run; already-fetched posts
//! are always delivered.

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use threadsift_core::{Post, RunConfig, RunSummary};
use threadsift_fetch::{FetchError, PostSource};

use crate::output::RecordSink;

/// Executes one scraper run end to end.
///
/// Validates the configuration, scrapes the configured subreddits in order
/// (with `delay` between them, not after the last), runs the search query
/// if present, pushes every post to `sink`, and finishes with one summary
/// record. Returns the posts for optional post-run export.
pub async fn run(
    config: &RunConfig,
    source: &dyn PostSource,
    sink: &mut dyn RecordSink,
    delay: Duration,
) -> Result<Vec<Post>> {
    config.validate()?;

    let mut all_posts: Vec<Post> = Vec::new();

    if !config.subreddits.is_empty() {
        info!(count = config.subreddits.len(), "Scraping subreddits");

        for (i, subreddit) in config.subreddits.iter().enumerate() {
            match scrape_subreddit(source, subreddit, config).await {
                Ok(posts) => all_posts.extend(posts),
                Err(e) => {
                    error!(subreddit = %subreddit, error = %e, "Error scraping subreddit");
                }
            }

            // Politeness delay between subreddits, skipped after the last.
            if i + 1 < config.subreddits.len() {
                sleep(delay).await;
            }
        }
    }

    if !config.search_query.is_empty() {
        let mut posts = source
            .search_posts(&config.search_query, config.sort_by, config.limit)
            .await?;
        if config.include_comments {
            enrich(source, &mut posts, config.max_comments_per_post).await?;
        }
        all_posts.extend(posts);
    }

    if all_posts.is_empty() {
        warn!("No posts were scraped. Check your input parameters.");
    } else {
        info!(count = all_posts.len(), "Saving posts to output");
        for post in &all_posts {
            sink.push_post(post)?;
        }
    }

    let search_query = (!config.search_query.is_empty()).then(|| config.search_query.clone());
    let summary = RunSummary::new(all_posts.len(), config.subreddits.len(), search_query);
    sink.push_summary(&summary)?;

    Ok(all_posts)
}

async fn scrape_subreddit(
    source: &dyn PostSource,
    subreddit: &str,
    config: &RunConfig,
) -> Result<Vec<Post>, FetchError> {
    let mut posts = source
        .subreddit_posts(subreddit, config.sort_by, config.time_filter, config.limit)
        .await?;

    if config.include_comments {
        enrich(source, &mut posts, config.max_comments_per_post).await?;
    }

    Ok(posts)
}

/// Fetches and attaches comments to every post that reports having any.
async fn enrich(
    source: &dyn PostSource,
    posts: &mut [Post],
    max_comments: i64,
) -> Result<(), FetchError> {
    for post in posts.iter_mut() {
        if post.num_comments > 0 {
            let comments = source
                .post_comments(&post.id, &post.subreddit, max_comments)
                .await?;
            post.comments = Some(comments);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use threadsift_core::{Comment, Sort, SourceKind, TimeFilter};
    use threadsift_fetch::normalize::{normalize_comment, normalize_post};

    fn post(id: &str, subreddit: &str, num_comments: i64) -> Post {
        normalize_post(
            &json!({"id": id, "subreddit": subreddit, "num_comments": num_comments}),
            SourceKind::Subreddit,
            subreddit,
        )
    }

    fn comment(id: &str, post_id: &str) -> Comment {
        normalize_comment(&json!({"id": id, "body": "hi"}), post_id)
    }

    /// Fake source: canned posts per subreddit (a missing entry fails the
    /// fetch), canned comments per post id.
    #[derive(Default)]
    struct FakeSource {
        posts: HashMap<String, Vec<Post>>,
        search_results: Vec<Post>,
        comments: HashMap<String, Vec<Comment>>,
        comment_calls: AtomicUsize,
    }

    #[async_trait]
    impl PostSource for FakeSource {
        async fn subreddit_posts(
            &self,
            subreddit: &str,
            _sort: Sort,
            _time_filter: TimeFilter,
            _limit: i64,
        ) -> Result<Vec<Post>, FetchError> {
            self.posts
                .get(subreddit)
                .cloned()
                .ok_or_else(|| FetchError::InvalidResponse(format!("boom: {subreddit}")))
        }

        async fn search_posts(
            &self,
            _query: &str,
            _sort: Sort,
            _limit: i64,
        ) -> Result<Vec<Post>, FetchError> {
            Ok(self.search_results.clone())
        }

        async fn post_comments(
            &self,
            post_id: &str,
            _subreddit: &str,
            _max_comments: i64,
        ) -> Result<Vec<Comment>, FetchError> {
            self.comment_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.comments.get(post_id).cloned().unwrap_or_default())
        }
    }

    /// Sink collecting records in memory.
    #[derive(Default)]
    struct MemorySink {
        posts: Vec<Post>,
        summaries: Vec<RunSummary>,
    }

    impl RecordSink for MemorySink {
        fn push_post(&mut self, post: &Post) -> Result<()> {
            self.posts.push(post.clone());
            Ok(())
        }

        fn push_summary(&mut self, summary: &RunSummary) -> Result<()> {
            self.summaries.push(summary.clone());
            Ok(())
        }
    }

    fn config(subreddits: &[&str]) -> RunConfig {
        RunConfig {
            subreddits: subreddits.iter().map(ToString::to_string).collect(),
            ..RunConfig::default()
        }
    }

    #[tokio::test]
    async fn failing_subreddit_keeps_earlier_results() {
        let mut source = FakeSource::default();
        source.posts.insert(
            "good".to_string(),
            vec![post("p1", "good", 0), post("p2", "good", 0)],
        );
        // "bad" has no entry, so its fetch errors.
        let mut sink = MemorySink::default();

        let posts = run(
            &config(&["good", "bad"]),
            &source,
            &mut sink,
            Duration::ZERO,
        )
        .await
        .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(sink.posts.len(), 2);
        assert_eq!(sink.summaries.len(), 1);
        assert_eq!(sink.summaries[0].total_posts, 2);
        // Count reflects configured subreddits, failed ones included.
        assert_eq!(sink.summaries[0].subreddits_scraped, 2);
    }

    #[tokio::test]
    async fn invalid_config_fails_before_any_fetch() {
        let source = FakeSource::default();
        let mut sink = MemorySink::default();

        let result = run(&RunConfig::default(), &source, &mut sink, Duration::ZERO).await;

        assert!(result.is_err());
        assert!(sink.posts.is_empty());
        assert!(sink.summaries.is_empty());
    }

    #[tokio::test]
    async fn enrichment_attaches_comments_only_where_reported() {
        let mut source = FakeSource::default();
        source.posts.insert(
            "rust".to_string(),
            vec![post("with", "rust", 2), post("without", "rust", 0)],
        );
        source
            .comments
            .insert("with".to_string(), vec![comment("c1", "with")]);
        let mut sink = MemorySink::default();

        let cfg = RunConfig {
            include_comments: true,
            ..config(&["rust"])
        };
        run(&cfg, &source, &mut sink, Duration::ZERO).await.unwrap();

        assert_eq!(source.comment_calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.posts[0].comments.as_ref().unwrap().len(), 1);
        assert!(sink.posts[1].comments.is_none());
    }

    #[tokio::test]
    async fn search_results_append_after_subreddits() {
        let mut source = FakeSource::default();
        source
            .posts
            .insert("rust".to_string(), vec![post("sub1", "rust", 0)]);
        source.search_results = vec![post("hit1", "rust", 0)];
        let mut sink = MemorySink::default();

        let cfg = RunConfig {
            search_query: "borrow checker".to_string(),
            ..config(&["rust"])
        };
        run(&cfg, &source, &mut sink, Duration::ZERO).await.unwrap();

        assert_eq!(sink.posts.len(), 2);
        assert_eq!(sink.posts[0].id, "sub1");
        assert_eq!(sink.posts[1].id, "hit1");
        assert_eq!(
            sink.summaries[0].search_query.as_deref(),
            Some("borrow checker")
        );
    }

    #[tokio::test]
    async fn empty_run_still_emits_summary() {
        let mut source = FakeSource::default();
        source.posts.insert("quiet".to_string(), Vec::new());
        let mut sink = MemorySink::default();

        run(&config(&["quiet"]), &source, &mut sink, Duration::ZERO)
            .await
            .unwrap();

        assert!(sink.posts.is_empty());
        assert_eq!(sink.summaries.len(), 1);
        assert_eq!(sink.summaries[0].total_posts, 0);
        assert!(sink.summaries[0].search_query.is_none());
    }
}

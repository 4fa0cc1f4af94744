//! Tabular flattening of posts and comments.
//!
//! Two fixed layouts are supported:
//!
//! - **Post rows**: one row per post, the `comments` sequence dropped.
//! - **Post+comment rows**: one row per post when it carries no comments,
//!   otherwise one row per comment with the post fields repeated; a
//!   `row_type` column discriminates the two.
//!
//! Booleans render as lowercase `"true"`/`"false"`, missing values as empty
//! strings. Column order is fixed by the constants below.

use crate::models::{Comment, Post};

/// Column order for post-only rows.
pub const POST_COLUMNS: [&str; 18] = [
    "id",
    "title",
    "selftext",
    "author",
    "subreddit",
    "score",
    "upvote_ratio",
    "num_comments",
    "created_utc",
    "created_at",
    "url",
    "permalink",
    "is_self",
    "is_video",
    "thumbnail",
    "domain",
    "source_type",
    "source_name",
];

/// Column order for post+comment expanded rows.
pub const POST_COMMENT_COLUMNS: [&str; 27] = [
    "row_type",
    "id",
    "title",
    "selftext",
    "author",
    "subreddit",
    "score",
    "upvote_ratio",
    "num_comments",
    "created_utc",
    "created_at",
    "url",
    "permalink",
    "is_self",
    "is_video",
    "thumbnail",
    "domain",
    "source_type",
    "source_name",
    "comment_id",
    "comment_author",
    "comment_body",
    "comment_score",
    "comment_created_at",
    "comment_permalink",
    "comment_is_submitter",
    "comment_parent_id",
];

fn render_bool(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

fn post_fields(post: &Post) -> Vec<String> {
    vec![
        post.id.clone(),
        post.title.clone(),
        post.selftext.clone(),
        post.author.clone(),
        post.subreddit.clone(),
        post.score.to_string(),
        post.upvote_ratio.to_string(),
        post.num_comments.to_string(),
        post.created_utc.to_string(),
        post.created_at.clone(),
        post.url.clone(),
        post.permalink.clone(),
        render_bool(post.is_self),
        render_bool(post.is_video),
        post.thumbnail.clone(),
        post.domain.clone(),
        post.source_type.as_str().to_string(),
        post.source_name.clone(),
    ]
}

fn comment_fields(comment: &Comment) -> Vec<String> {
    vec![
        comment.id.clone(),
        comment.author.clone(),
        comment.body.clone(),
        comment.score.to_string(),
        comment.created_at.clone(),
        comment.permalink.clone(),
        render_bool(comment.is_submitter),
        comment.parent_id.clone(),
    ]
}

/// Flattens posts to one row each, matching [`POST_COLUMNS`].
pub fn post_rows(posts: &[Post]) -> Vec<Vec<String>> {
    posts.iter().map(post_fields).collect()
}

/// Flattens posts and their comments, matching [`POST_COMMENT_COLUMNS`].
///
/// A post without comments contributes one `"post"` row with empty comment
/// columns; a post with comments contributes one `"comment"` row per comment,
/// the post fields repeated on each.
pub fn post_comment_rows(posts: &[Post]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for post in posts {
        let comments = post.comments.as_deref().unwrap_or(&[]);

        if comments.is_empty() {
            let mut row = vec!["post".to_string()];
            row.extend(post_fields(post));
            row.extend(std::iter::repeat_n(String::new(), 8));
            rows.push(row);
        } else {
            for comment in comments {
                let mut row = vec!["comment".to_string()];
                row.extend(post_fields(post));
                row.extend(comment_fields(comment));
                rows.push(row);
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;

    fn sample_post(id: &str, comments: Option<Vec<Comment>>) -> Post {
        Post {
            id: id.to_string(),
            title: "Test Post".to_string(),
            selftext: String::new(),
            author: "testuser".to_string(),
            subreddit: "rust".to_string(),
            score: 42,
            upvote_ratio: 0.95,
            num_comments: comments.as_ref().map_or(0, Vec::len) as i64,
            created_utc: 1_609_459_200.0,
            created_at: "2021-01-01T00:00:00+00:00".to_string(),
            url: "https://example.com".to_string(),
            permalink: "https://reddit.com/r/rust/comments/abc/".to_string(),
            is_self: true,
            is_video: false,
            thumbnail: String::new(),
            domain: "self.rust".to_string(),
            source_type: SourceKind::Subreddit,
            source_name: "rust".to_string(),
            comments,
        }
    }

    fn sample_comment(id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            author: "commenter".to_string(),
            body: "Great post!".to_string(),
            score: 7,
            created_utc: 1_609_459_300.0,
            created_at: "2021-01-01T00:01:40+00:00".to_string(),
            permalink: "https://reddit.com/r/rust/comments/abc/c1/".to_string(),
            is_submitter: false,
            parent_id: "t3_abc".to_string(),
            post_id: "abc".to_string(),
        }
    }

    #[test]
    fn post_rows_match_column_count() {
        let rows = post_rows(&[sample_post("a", None), sample_post("b", None)]);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.len(), POST_COLUMNS.len());
        }
    }

    #[test]
    fn booleans_render_lowercase() {
        let rows = post_rows(&[sample_post("a", None)]);
        let is_self_idx = POST_COLUMNS.iter().position(|c| *c == "is_self").unwrap();
        let is_video_idx = POST_COLUMNS.iter().position(|c| *c == "is_video").unwrap();
        assert_eq!(rows[0][is_self_idx], "true");
        assert_eq!(rows[0][is_video_idx], "false");
    }

    #[test]
    fn post_without_comments_yields_single_post_row() {
        let rows = post_comment_rows(&[sample_post("a", None)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "post");
        assert_eq!(rows[0].len(), POST_COMMENT_COLUMNS.len());
        // Comment columns are empty.
        assert!(rows[0][POST_COMMENT_COLUMNS.len() - 8..].iter().all(String::is_empty));
    }

    #[test]
    fn post_with_comments_expands_to_comment_rows() {
        let post = sample_post("a", Some(vec![sample_comment("c1"), sample_comment("c2")]));
        let rows = post_comment_rows(&[post]);

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row[0], "comment");
            assert_eq!(row[1], "a"); // post fields repeated
            assert_eq!(row.len(), POST_COMMENT_COLUMNS.len());
        }
        assert_eq!(rows[0][19], "c1");
        assert_eq!(rows[1][19], "c2");
    }

    #[test]
    fn empty_comment_list_counts_as_no_comments() {
        let rows = post_comment_rows(&[sample_post("a", Some(vec![]))]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "post");
    }
}

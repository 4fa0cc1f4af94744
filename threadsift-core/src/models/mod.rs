//! Domain models for Threadsift.
//!
//! This module contains the normalized record types produced by the fetch
//! layer. Every field has a defined default; normalization never fails on a
//! missing upstream field, so these records are always fully populated.
//!
//! ## Submodules
//!
//! - [`post`] - Normalized submissions ([`Post`], [`Sort`], [`TimeFilter`], [`SourceKind`])
//! - [`comment`] - Normalized top-level replies ([`Comment`])
//! - [`summary`] - End-of-run summary record ([`RunSummary`])

mod comment;
mod post;
mod summary;

// Re-export everything at the models level
pub use comment::Comment;
pub use post::{Post, Sort, SourceKind, TimeFilter};
pub use summary::RunSummary;

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Threadsift Core
//!
//! Core types, models, and configuration for the Threadsift scraper.
//!
//! This crate provides the foundational abstractions used across the other
//! Threadsift crates, including:
//!
//! - Domain models ([`Post`], [`Comment`], [`RunSummary`])
//! - Run configuration and validation ([`RunConfig`])
//! - Error types ([`CoreError`])
//! - Tabular flattening for CSV export ([`export`])
//!
//! Everything here is pure data: no I/O, no network, no async. The fetch
//! layer produces these records and the CLI forwards them to an output sink.

pub mod config;
pub mod error;
pub mod export;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export configuration
pub use config::RunConfig;

// Re-export all model types
pub use models::{Comment, Post, RunSummary, Sort, SourceKind, TimeFilter};

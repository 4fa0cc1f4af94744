// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Threadsift Fetch
//!
//! The fetch-normalize-retry pipeline for the Threadsift scraper.
//!
//! This crate turns Reddit's public JSON endpoints into the stable record
//! types from `threadsift-core`:
//!
//! - [`url`] - pure URL construction for listing, search, and comment
//!   endpoints
//! - [`retry`] - the backoff schedule as a pure policy, unit-testable
//!   without real sleeps
//! - [`client`] - [`RetryClient`], a GET client with bounded exponential
//!   backoff and a three-way outcome ([`GetOutcome`])
//! - [`normalize`] - total functions mapping raw JSON into
//!   [`Post`](threadsift_core::Post) and [`Comment`](threadsift_core::Comment)
//!   records
//! - [`service`] - [`RedditService`], the three fetch operations, each
//!   degrading to an empty result on upstream failure
//!
//! All network I/O is strictly sequential; the client retries rate-limited
//! (403) responses and transport failures up to three times before giving
//! up on a single request.

pub mod client;
pub mod error;
pub mod normalize;
pub mod retry;
pub mod service;
pub mod url;

pub use client::{GetOutcome, HttpTransport, RawResponse, RetryClient, Transport};
pub use error::{FetchError, TransportError};
pub use retry::RetryPolicy;
pub use service::{PostSource, RedditService};

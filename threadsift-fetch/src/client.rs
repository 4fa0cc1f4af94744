//! HTTP retry client.
//!
//! [`RetryClient`] issues a single GET with bounded retries and exponential
//! backoff. Rate-limited (403) responses and transport failures are retried
//! on the same schedule; everything else resolves immediately. The result is
//! a three-way [`GetOutcome`] so callers can branch exhaustively on
//! success, a real HTTP status, or transport exhaustion.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::error::{FetchError, TransportError};
use crate::retry::RetryPolicy;
use crate::url::USER_AGENT;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP status treated as rate limiting by the upstream API.
const RATE_LIMIT_STATUS: u16 = 403;

/// A raw HTTP response: status plus unparsed body text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Transport seam under the retry client.
///
/// Production uses [`HttpTransport`]; tests inject a scripted fake so the
/// retry loop can be exercised without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one GET request.
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

/// Real transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner: client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::from(&e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from(&e))?;

        Ok(RawResponse { status, body })
    }
}

/// Outcome of one retried GET.
#[derive(Debug, Clone)]
pub enum GetOutcome {
    /// HTTP 200. `body` is `None` when the payload was not valid JSON;
    /// callers must treat that as "no usable data", not as retryable.
    Success {
        /// Parsed response body.
        body: Option<Value>,
    },
    /// A non-success HTTP status (403 only after retries were exhausted).
    /// The body carries `{"error": <response text>}`.
    HttpError {
        /// HTTP status code.
        status: u16,
        /// Error body.
        body: Value,
    },
    /// Transport failures persisted through every retry; no HTTP status was
    /// ever received.
    TransportExhausted,
}

/// GET client with bounded exponential-backoff retries.
pub struct RetryClient {
    transport: Box<dyn Transport>,
    policy: RetryPolicy,
}

impl RetryClient {
    /// Creates a client over the given transport with the default policy
    /// (3 retries, 2-second base delay).
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            policy: RetryPolicy::default(),
        }
    }

    /// Sets the retry policy for this client.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Performs a GET, retrying rate limits and transport failures.
    pub async fn get(&self, url: &str) -> GetOutcome {
        let mut attempt = 0;

        loop {
            debug!(url = %url, attempt, "Making GET request");

            match self.transport.get(url).await {
                Ok(response) if response.status == 200 => {
                    let body = serde_json::from_str(&response.body).ok();
                    if body.is_none() {
                        warn!(url = %url, "Response was not valid JSON");
                    }
                    return GetOutcome::Success { body };
                }
                Ok(response)
                    if response.status == RATE_LIMIT_STATUS
                        && attempt < self.policy.max_retries =>
                {
                    let delay = self.policy.delay_for_attempt(attempt);
                    warn!(
                        status = response.status,
                        attempt,
                        delay_secs = delay.as_secs_f64(),
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Ok(response) => {
                    warn!(status = response.status, url = %url, "Request failed");
                    return GetOutcome::HttpError {
                        status: response.status,
                        body: json!({ "error": response.body }),
                    };
                }
                Err(e) if attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for_attempt(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        delay_secs = delay.as_secs_f64(),
                        "Transport failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(error = %e, url = %url, "Retries exhausted");
                    return GetOutcome::TransportExhausted;
                }
            }
        }
    }
}

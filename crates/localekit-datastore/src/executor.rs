// crates/localekit-datastore/src/executor.rs
// ============================================================================
// Module: Statement Executors
// Description: Trait seam and blocking HTTP implementation for SQL execution.
// Purpose: Execute one statement as an atomic unit against the collaborator.
// Dependencies: reqwest, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! [`StatementExecutor`] is the seam between the migration runner and the
//! external data-store service. [`HttpStatementExecutor`] is the production
//! implementation: a blocking POST of the statement to the configured
//! endpoint with a bearer credential. Non-success status codes fail closed.
//!
//! ## Invariants
//! - No retries and no redirect following; each call either completes or
//!   fails with a reportable error.
//! - Requests carry a fixed timeout ([`REQUEST_TIMEOUT`]).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use serde_json::json;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Fixed per-request timeout for data-store calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while talking to the external data-store service.
#[derive(Debug, Error)]
pub enum DatastoreError {
    /// The configured endpoint is not a usable URL.
    #[error("invalid datastore endpoint: {0}")]
    InvalidEndpoint(String),
    /// The HTTP client could not be constructed.
    #[error("datastore client init failed: {0}")]
    ClientInit(String),
    /// The request failed at the transport level.
    #[error("datastore request failed: {0}")]
    Request(String),
    /// The service answered with a non-success status.
    #[error("datastore rejected statement (status {status}): {body}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
        /// The response body, truncated for reporting.
        body: String,
    },
}

// ============================================================================
// SECTION: Executor Trait
// ============================================================================

/// Executes one SQL statement as an atomic unit.
pub trait StatementExecutor {
    /// Executes a single statement against the collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`DatastoreError`] when the statement is rejected or the
    /// call fails at the transport level.
    fn execute(&self, statement: &str) -> Result<(), DatastoreError>;
}

// ============================================================================
// SECTION: HTTP Executor
// ============================================================================

/// Maximum response-body bytes kept when reporting a rejection.
const MAX_REPORTED_BODY_BYTES: usize = 1024;

/// Blocking HTTP executor posting statements to the data-store RPC endpoint.
///
/// # Invariants
/// - The credential is held opaquely and sent only as a bearer header.
#[derive(Debug)]
pub struct HttpStatementExecutor {
    /// Validated RPC endpoint.
    endpoint: Url,
    /// Opaque credential injected from configuration.
    credential: String,
    /// Shared blocking client with fixed timeout and no redirects.
    client: Client,
}

impl HttpStatementExecutor {
    /// Creates an executor for the given endpoint and credential.
    ///
    /// # Errors
    ///
    /// Returns [`DatastoreError::InvalidEndpoint`] for a malformed or
    /// non-http(s) endpoint and [`DatastoreError::ClientInit`] when the
    /// client cannot be constructed.
    pub fn new(endpoint: &str, credential: String) -> Result<Self, DatastoreError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| DatastoreError::InvalidEndpoint(err.to_string()))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(DatastoreError::InvalidEndpoint(format!(
                "unsupported scheme: {}",
                endpoint.scheme()
            )));
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(Policy::none())
            .build()
            .map_err(|err| DatastoreError::ClientInit(err.to_string()))?;
        Ok(Self {
            endpoint,
            credential,
            client,
        })
    }
}

impl StatementExecutor for HttpStatementExecutor {
    fn execute(&self, statement: &str) -> Result<(), DatastoreError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.credential)
            .json(&json!({ "query": statement }))
            .send()
            .map_err(|err| DatastoreError::Request(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        let truncated: String = body.chars().take(MAX_REPORTED_BODY_BYTES).collect();
        Err(DatastoreError::Rejected {
            status: status.as_u16(),
            body: truncated,
        })
    }
}

//! # Remote Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Configuration   InvalidBaseUrl, ClientBuild                           │
//! │  Transport       Http (connect, timeout, body read)                    │
//! │  Response        NotFound (404), Status (other non-2xx), Decode        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant reaches the UI as a network failure except `NotFound`,
//! which the storefront reports as a missing record.

use thiserror::Error;

/// Result type alias for remote calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Connection refused, timeout, or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// The server answered 2xx with a body that does not match the type.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }

    /// True when the request may not have reached the server at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, RemoteError::Http(e) if e.is_connect() || e.is_timeout())
    }
}

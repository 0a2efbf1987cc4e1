//! Error types for the character API client.
//!
//! # Design
//! The screen treats every failure the same way (log, stop loading, keep the
//! list), so there is a single error type. The variants exist for
//! diagnostics only: callers must not branch on them to decide UI behavior.

use thiserror::Error;

/// A failed character fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not a `{ "results": [...] }` envelope of characters.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The base URL plus query could not be turned into an absolute URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

// ABOUTME: Structured error types for Endomondo mobile API operations
// ABOUTME: Defines the transport/protocol error taxonomy with request context
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the Endomondo protocol adapter and its callers.
///
/// Transport failures (non-2xx status, connection errors) are raised before
/// any body parsing is attempted. Protocol failures carry the offending line
/// and the request URL so callers can log something actionable. There is no
/// retry layer; every error aborts the current operation entirely.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP-level failure: connection error or non-2xx status
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx text response whose status line was not `OK`
    #[error("protocol error at {url}: {line}")]
    Protocol {
        /// Request URL that produced the malformed response
        url: String,
        /// The offending status line, verbatim
        line: String,
    },

    /// A 2xx response with an empty body
    #[error("empty response from {url}")]
    EmptyResponse {
        /// Request URL that produced the empty response
        url: String,
    },

    /// A JSON-mode response that was not the expected `{"data": [...]}` envelope
    #[error("malformed JSON envelope from {url}")]
    Json {
        /// Request URL that produced the malformed response
        url: String,
        /// Underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A timestamp that does not match the server's `YYYY-MM-DD HH:MM:SS UTC` format
    #[error("invalid server timestamp {value:?}")]
    InvalidTimestamp {
        /// The string that failed to parse
        value: String,
        /// Underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// A non-empty trackpoint field that could not be parsed as a number
    #[error("invalid trackpoint {field} value {value:?}")]
    InvalidSample {
        /// Which trackpoint field failed to parse
        field: &'static str,
        /// The string that failed to parse
        value: String,
    },

    /// A workout record in the list response carried no `id` property
    #[error("workout record missing `id` property")]
    MissingWorkoutId,
}

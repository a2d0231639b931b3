//! Error types for the request helper.
//!
//! # Design
//! Collaborator failures (URL resolution, transport I/O) are carried as
//! boxed errors and exposed through `source()`, so callers can downcast to
//! the concrete error their config or transport produced. Failures the
//! helper detects itself get dedicated variants.

/// Boxed error returned by `ClientConfig` and `Transport` implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `RequestSpec::new`, `RequestSpec::send` and
/// `handle_response`.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The config could not turn the request path into an absolute URL.
    #[error("failed to resolve URL: {0}")]
    UrlResolution(#[source] BoxError),

    /// The method string is not a standard HTTP verb.
    #[error("invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server answered with a status outside 200-299.
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    /// The response declared `application/json` but its body is not JSON.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

/// A version string or number that does not name HTTP/1.0, 1.1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP version: {0}")]
pub struct UnsupportedVersion(pub String);

impl RequestError {
    /// Status code carried by `HttpStatus`, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

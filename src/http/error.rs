//! Error types for the HTTP layer.

use thiserror::Error;

use crate::http::method::Method;

/// Errors that can occur while parsing an HTTP request.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The HTTP method in the request is not supported.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The HTTP version in the request is not supported.
    #[error("invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// The request line is malformed (wrong format or missing components).
    #[error("malformed request line: {0}")]
    MalformedRequestLine(String),

    /// A header in the request has an invalid format.
    #[error("invalid header format")]
    InvalidHeaderFormat,

    /// A required header is missing from the request.
    #[error("required header is missing: {0}")]
    MissingHeader(String),

    /// The request is empty.
    #[error("empty request")]
    EmptyRequest,

    /// The request body is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No route matched the requested path.
    #[error("not found: {0}")]
    NotFound(String),

    /// A route matched the path but not the method.
    #[error("method {0} not allowed for path: {1}")]
    MethodNotAllowed(Method, String),

    /// JSON serialization error while building a response.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

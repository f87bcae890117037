//! Error types for riposte.

use derive_more::{Display, Error, From};

use crate::Body;

// ============================================================================
// Deserialization Error
// ============================================================================

/// JSON deserialization failure with path context.
#[derive(Debug, Clone, Display, Error)]
#[display("JSON deserialization error at '{path}': {message}")]
pub struct DeserializeError {
    /// JSON path to the error (e.g., "user.address.city").
    pub path: String,
    /// Error message.
    pub message: String,
}

// ============================================================================
// Decode Error
// ============================================================================

/// What went wrong while decoding a response body.
#[derive(Debug, Display, Error, From)]
pub enum DecodeKind {
    /// No body was kept for the exchange.
    #[display("the response body is empty")]
    EmptyBody,

    /// The body shape cannot be decoded.
    #[display("unsupported body representation: {_0}")]
    #[from(skip)]
    Unsupported(#[error(not(source))] &'static str),

    /// Reading the materialized body failed.
    #[display("failed to read the response body: {_0}")]
    Io(std::io::Error),

    /// The payload did not deserialize into the target type.
    #[display("{_0}")]
    Deserialize(DeserializeError),
}

/// Structured failure from turning a response body into a typed value.
///
/// Carries the original materialized [`Body`] value for diagnostics; the
/// causing fault, when there is one, is reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Display)]
#[display("unable to decode response body: {kind}")]
pub struct DecodeError {
    kind: DecodeKind,
    body: Body,
}

impl DecodeError {
    /// Create a decode error for the given body value.
    #[must_use]
    pub fn new(kind: impl Into<DecodeKind>, body: Body) -> Self {
        Self {
            kind: kind.into(),
            body,
        }
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> &DecodeKind {
        &self.kind
    }

    /// The materialized body value that failed to decode.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Returns `true` if decoding failed because no body was kept.
    #[must_use]
    pub const fn is_empty_body(&self) -> bool {
        matches!(self.kind, DecodeKind::EmptyBody)
    }

    /// Returns `true` if decoding failed on an undecodable body shape.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.kind, DecodeKind::Unsupported(_))
    }

    /// Returns `true` if the payload itself failed to deserialize.
    #[must_use]
    pub const fn is_deserialize(&self) -> bool {
        matches!(self.kind, DecodeKind::Deserialize(_))
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DecodeKind::Io(error) => Some(error),
            DecodeKind::Deserialize(error) => Some(error),
            DecodeKind::EmptyBody | DecodeKind::Unsupported(_) => None,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for riposte operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// I/O failure while materializing a response body.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),

    /// Blocking runtime bootstrap failure.
    #[display("runtime error: {_0}")]
    #[from(skip)]
    Runtime(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// Response body decoding error.
    #[display("{_0}")]
    #[from]
    Decode(DecodeError),
}

/// Result type alias defaulting to [`crate::Error`].
///
/// The error parameter can be overridden for operations with a narrower
/// failure mode, e.g. `Result<T, DecodeError>` for body decoding.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a runtime error.
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if this is a body decoding error.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns the decode error if this is a body decoding failure.
    #[must_use]
    pub const fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode(error) => Some(error),
            _ => None,
        }
    }
}

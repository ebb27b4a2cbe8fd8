//! Error types for the Axerve client.
//!
//! Two channels carry failures back to callers:
//!
//! - [`Error`] is returned as `Err(..)`: HTTP status failures (classified by
//!   [`crate::classify`]), undecodable bodies, and transport problems.
//! - In-band gateway rejections (`error.code != "0"` inside a 2xx body) are
//!   data, reported by [`crate::ResponseEnvelope::has_error`].

use derive_more::{Display, Error, From};

use crate::RawPayload;

/// Message used when the gateway does not describe an error.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

// ============================================================================
// Classified Error
// ============================================================================

/// Category of an HTTP status failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// 401 or 403.
    #[display("authentication")]
    Authentication,
    /// 400 or 422, with field-level errors.
    #[display("validation")]
    Validation,
    /// Any 5xx.
    #[display("server")]
    Server,
    /// Any other status from 400 up.
    #[display("generic")]
    Generic,
}

/// Result of classifying a failed HTTP exchange.
///
/// Produced by [`crate::classify`]; converts into [`Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedError {
    kind: ErrorKind,
    status: u16,
    message: String,
    validation_errors: Option<RawPayload>,
}

impl ClassifiedError {
    /// Create a classified error.
    ///
    /// `validation_errors` is only kept for [`ErrorKind::Validation`].
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        status: u16,
        message: impl Into<String>,
        validation_errors: Option<RawPayload>,
    ) -> Self {
        let validation_errors = match kind {
            ErrorKind::Validation => Some(validation_errors.unwrap_or_default()),
            _ => None,
        };
        Self {
            kind,
            status,
            message: message.into(),
            validation_errors,
        }
    }

    /// Error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field-level errors, for validation failures only.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&RawPayload> {
        self.validation_errors.as_ref()
    }
}

impl From<ClassifiedError> for Error {
    fn from(err: ClassifiedError) -> Self {
        let ClassifiedError {
            kind,
            status,
            message,
            validation_errors,
        } = err;

        match kind {
            ErrorKind::Authentication => Self::Authentication { status, message },
            ErrorKind::Validation => Self::Validation {
                status,
                message,
                errors: validation_errors.unwrap_or_default(),
            },
            ErrorKind::Server => Self::Server { status, message },
            ErrorKind::Generic => Self::Api { status, message },
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for Axerve operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Credentials rejected (401, 403).
    #[display("authentication error (HTTP {status}): {message}")]
    #[from(skip)]
    Authentication {
        /// HTTP status code.
        status: u16,
        /// Gateway description or [`UNKNOWN_ERROR_MESSAGE`].
        message: String,
    },

    /// Request rejected as invalid (400, 422).
    #[display("validation error (HTTP {status}): {message}")]
    #[from(skip)]
    Validation {
        /// HTTP status code.
        status: u16,
        /// Gateway description or [`UNKNOWN_ERROR_MESSAGE`].
        message: String,
        /// The body's `error` object, empty when absent.
        errors: RawPayload,
    },

    /// Gateway-side failure (5xx).
    #[display("{message} (HTTP {status})")]
    #[from(skip)]
    Server {
        /// HTTP status code.
        status: u16,
        /// Prefixed gateway description.
        message: String,
    },

    /// Any other status from 400 up.
    #[display("{message} (HTTP {status})")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Prefixed gateway description.
        message: String,
    },

    /// Body could not be decoded as a JSON object.
    #[display("malformed response (HTTP {status}) at '{path}': {message}")]
    #[from(skip)]
    MalformedResponse {
        /// HTTP status code.
        status: u16,
        /// JSON path to the error (`.` for the document root).
        path: String,
        /// Decoder message.
        message: String,
    },

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

    /// Invalid client configuration.
    #[display("invalid configuration: {_0}")]
    #[from(skip)]
    InvalidConfig(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(status: u16, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            status,
            path: path.into(),
            message: message.into(),
        }
    }

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

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// The classification category, for HTTP status failures.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Authentication { .. } => Some(ErrorKind::Authentication),
            Self::Validation { .. } => Some(ErrorKind::Validation),
            Self::Server { .. } => Some(ErrorKind::Server),
            Self::Api { .. } => Some(ErrorKind::Generic),
            _ => None,
        }
    }

    /// Returns the HTTP status code, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::Validation { status, .. }
            | Self::Server { status, .. }
            | Self::Api { status, .. }
            | Self::MalformedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for 401/403 failures.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for 400/422 failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` for 5xx failures.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns `true` if the body could not be decoded.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
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

    /// Returns `true` if no usable response came back (connection, TLS, timeout).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }

    /// Field-level errors of a validation failure.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&RawPayload> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

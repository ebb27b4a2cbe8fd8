//! Core types for the Axerve payment gateway client.
//!
//! This crate holds everything that does not touch the network:
//! - [`FieldRecord`], [`map_record`] - map raw JSON objects onto declared fields
//! - [`CreationPayload`], [`DetailPayload`], [`Payload`] - typed payload shapes
//! - [`ResponseEnvelope`] - the `{error, payload}` wrapper returned by every call
//! - [`classify`] - turn an HTTP status into a [`ClassifiedError`]
//! - [`Error`] and [`Result`] - error handling
//! - [`Request`], [`Response`], [`HttpClient`] - the transport seam
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod classify;
mod client;
mod envelope;
mod error;
mod field;
mod method;
mod path_template;
mod payload;
pub mod prelude;
mod request;
mod response;

pub use body::{from_json, to_json};
pub use classify::{API_ERROR_PREFIX, SERVER_ERROR_PREFIX, classify};
pub use client::HttpClient;
pub use envelope::{ErrorInfo, ResponseEnvelope};
pub use error::{ClassifiedError, Error, ErrorKind, Result, UNKNOWN_ERROR_MESSAGE};
pub use field::{FieldKind, FieldRecord, FieldValue, map_record, map_value};
pub use method::Method;
pub use path_template::PathTemplate;
pub use payload::{
    CardData, CreationPayload, DetailPayload, Payload, PaymentEvent, SUCCESSFUL_RESULTS,
    UserRedirect, VariantKind,
};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{HeaderMap, HeaderValue, StatusCode, header};

/// A decoded JSON object, as received from the gateway.
pub type RawPayload = serde_json::Map<String, serde_json::Value>;

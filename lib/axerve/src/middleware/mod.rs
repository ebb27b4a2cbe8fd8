//! Tower middleware layers for the gateway HTTP client.
//!
//! Layers wrap the [`HyperClient`](crate::HyperClient) service and are added
//! through [`HyperClientBuilder`](crate::HyperClientBuilder).
//!
//! - [`ApiKeyAuthLayer`] - Adds `Authorization: apikey <key>` header
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```
//! use axerve::HyperClient;
//! use axerve::middleware::{ApiKeyAuthLayer, LoggingLayer};
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .layer(ApiKeyAuthLayer::new("my-api-key"))
//!     .build();
//! ```

mod api_key_auth;
mod logging;

pub use api_key_auth::{ApiKeyAuth, ApiKeyAuthLayer};
pub use logging::{LogLevel, Logging, LoggingLayer, REDACTED};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};

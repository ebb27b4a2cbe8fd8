//! Async client for the Axerve (Gestpay) payment gateway.
//!
//! [`AxerveClient`] sends requests through a [`HyperClient`] with Tower
//! middleware, then reads each answer as a [`ResponseEnvelope`]: statuses from
//! 400 up become classified [`Error`]s, while errors the gateway reports inside
//! a successful response stay on the envelope.
//!
//! # Example
//!
//! ```no_run
//! use axerve::prelude::*;
//! use serde_json::json;
//!
//! # async fn run() -> axerve::Result<()> {
//! let config = GatewayConfig::builder()
//!     .api_key("my-api-key")
//!     .shop_login("GESPAY12345")
//!     .environment(Environment::Sandbox)
//!     .build()?;
//! let client = AxerveClient::new(config);
//!
//! let detail = client.payment().detail("1234567", None).await?;
//! if detail.is_successful() {
//!     let payload = detail.detail();
//!     println!("authorized: {:?}", payload.and_then(|p| p.authorization_code()));
//! } else {
//!     println!("failed: {:?}", detail.error_message());
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod connector;
mod gateway;
pub mod middleware;
pub mod prelude;

// Re-export client types
pub use api::{Check, LOOKUP_KEYS, Payment, Shop};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_API_VERSION, Environment, GatewayConfig,
    GatewayConfigBuilder, USER_AGENT,
};
pub use gateway::AxerveClient;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use axerve_core::{
    API_ERROR_PREFIX, CardData, ClassifiedError, CreationPayload, DetailPayload, Error, ErrorInfo,
    ErrorKind, FieldKind, FieldRecord, FieldValue, HttpClient, Method, PathTemplate, Payload,
    PaymentEvent, RawPayload, Request, RequestBuilder, Response, ResponseEnvelope, Result,
    SERVER_ERROR_PREFIX, SUCCESSFUL_RESULTS, UNKNOWN_ERROR_MESSAGE, UserRedirect, VariantKind,
    classify, from_json, map_record, map_value, to_json,
};

// Re-export http types for status codes and headers
pub use axerve_core::{HeaderMap, HeaderValue, StatusCode, header};

//! HTTP client trait.
//!
//! [`HttpClient`] is the seam between the gateway operations and the transport.
//! The `axerve` crate ships a hyper-based implementation; tests and custom
//! transports can provide their own.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations return every received response, whatever its status.
/// Status classification happens above this layer.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

//! Tracing for gateway exchanges.
//!
//! Logs gateway exchanges using the `tracing` crate. The span carries the
//! endpoint template when the request has one, so `/payment/detail/{paymentID}`
//! groups every detail lookup. Debug level also logs headers, with the
//! `Authorization` value replaced by [`REDACTED`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axerve_core::PathTemplate;
use bytes::Bytes;
use http::{HeaderMap, header};
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Placeholder logged instead of credentials.
pub const REDACTED: &str = "<redacted>";

/// Layer that traces each gateway exchange.
///
/// # Example
///
/// ```
/// use axerve::middleware::{LoggingLayer, ServiceBuilder};
/// use axerve::HyperClient;
///
/// let service = ServiceBuilder::new()
///     .layer(LoggingLayer::new())
///     .service(HyperClient::new());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// How much [`Logging`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Headers (redacted) and body sizes as well.
    Debug,
    /// Status and latency only.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Info-level layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Debug-level layer.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// Header pairs safe to log: credentials and sensitive values are masked.
fn redacted_headers(headers: &HeaderMap) -> Vec<(&str, &str)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if value.is_sensitive() || *name == header::AUTHORIZATION {
                REDACTED
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            (name.as_str(), shown)
        })
        .collect()
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        // The query may carry a payment token.
        let path = request.url().path().to_string();
        let endpoint = request
            .extensions()
            .get::<PathTemplate>()
            .map_or("", PathTemplate::as_str);
        let level = self.level;

        let span = span!(Level::INFO, "axerve_request", %method, %path, endpoint);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            headers = ?redacted_headers(request.headers()),
                            body_len = request.body().map_or(0, Bytes::len),
                            "calling gateway"
                        );
                    }
                    LogLevel::Info => {
                        info!("calling gateway");
                    }
                }

                let result = inner.call(request).await;

                // Saturating conversion to u64
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        if status < 400 {
                            info!(status, elapsed_ms, "gateway answered");
                        } else {
                            warn!(status, elapsed_ms, "gateway answered with an error status");
                        }
                        if level == LogLevel::Debug {
                            debug!(
                                headers = ?redacted_headers(response.headers()),
                                body_len = response.body().len(),
                                "received response"
                            );
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "no answer from gateway");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

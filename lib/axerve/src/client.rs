//! HTTP client implementation using hyper-util.
//!
//! [`HyperClient`] owns a pooled hyper client wrapped in a boxed Tower service,
//! so middleware from [`crate::middleware`] can be stacked on top of it.

use std::error::Error as _;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{
    Error, HttpClient, Request, Response, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
    middleware::{ApiKeyAuthLayer, LoggingLayer},
};

/// Type-erased service every layer wraps.
pub type BoxedService = BoxCloneService<Request<Bytes>, Response<Bytes>, Error>;

/// Future returned by [`HyperClient`] as a Tower service.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

type LayerFn = Box<dyn FnOnce(BoxedService) -> BoxedService + Send + Sync>;

/// `BoxedService` is `Send` but not `Sync`; each call clones it out of the lock.
#[derive(Clone)]
struct SharedService(Arc<Mutex<BoxedService>>);

impl SharedService {
    fn dispatch(&self, request: Request<Bytes>) -> ServiceFuture {
        let mut service = self
            .0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Box::pin(async move { service.call(request).await })
    }
}

// ============================================================================
// Transport
// ============================================================================

/// The innermost service: one hyper round trip with a deadline.
#[derive(Clone)]
struct Transport {
    hyper: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    timeout: Duration,
}

impl Transport {
    fn new(config: &ClientConfig) -> Self {
        let hyper = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(config.connect_timeout));

        Self {
            hyper,
            timeout: config.timeout,
        }
    }

    fn to_hyper(request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body, extensions) = request.into_parts();
        let uri = url
            .as_str()
            .parse::<http::Uri>()
            .map_err(|e| Error::invalid_request(e.to_string()))?;

        let mut hyper_request = http::Request::new(body.map_or_else(Full::default, Full::new));
        *hyper_request.method_mut() = method.into();
        *hyper_request.uri_mut() = uri;
        *hyper_request.headers_mut() = headers;
        *hyper_request.extensions_mut() = extensions;

        Ok(hyper_request)
    }

    async fn round_trip(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = Self::to_hyper(request)?;

        let response = tokio::time::timeout(self.timeout, self.hyper.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(|err| transport_error(&err))?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(parts.status.as_u16(), parts.headers, body))
    }
}

/// Map a hyper failure: connect timeouts, TLS handshakes, everything else.
fn transport_error(err: &hyper_util::client::legacy::Error) -> Error {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>()
            && io.kind() == std::io::ErrorKind::TimedOut
        {
            return Error::Timeout;
        }
        if cause.downcast_ref::<rustls::Error>().is_some() {
            return Error::tls(cause.to_string());
        }
        source = cause.source();
    }

    Error::connection(err.to_string())
}

impl Service<Request<Bytes>> for Transport {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().round_trip(request))
    }
}

// ============================================================================
// Public Client
// ============================================================================

/// HTTP client using hyper-util with connection pooling, TLS, and middleware support.
///
/// Every received response is returned as-is, whatever its status.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use axerve::HyperClient;
///
/// let plain = HyperClient::new();
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_api_key_auth("my-api-key")
///     .with_logging()
///     .build();
/// assert_eq!(client.config().timeout, Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: SharedService,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a client with default configuration and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client with custom configuration and no middleware.
    #[must_use]
    pub fn with_config(config: &ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.service.dispatch(request).await
    }
}

impl Service<Request<Bytes>> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.service.dispatch(request)
    }
}

/// Builder for [`HyperClient`].
///
/// Each layer wraps the service built so far, so the last layer added is the
/// first to see a request.
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    layers: Vec<LayerFn>,
    default_logging: bool,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers", &self.layers.len())
            .field("default_logging", &self.default_logging)
            .finish()
    }
}

impl HyperClientBuilder {
    /// Replace every connection setting with `config`.
    #[must_use]
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.config = ClientConfig::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_per_host(config.pool_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout);
        self
    }

    /// Set the request timeout, covering the whole round trip.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a Tower layer to the client.
    ///
    /// # Example
    ///
    /// ```
    /// use axerve::HyperClient;
    /// use axerve::middleware::ApiKeyAuthLayer;
    ///
    /// let client = HyperClient::builder()
    ///     .layer(ApiKeyAuthLayer::new("my-api-key"))
    ///     .build();
    /// ```
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send,
    {
        self.layers
            .push(Box::new(move |inner| BoxCloneService::new(layer.layer(inner))));
        self
    }

    /// Log every exchange at info level, beneath all added layers.
    #[must_use]
    pub const fn with_defaults(mut self) -> Self {
        self.default_logging = true;
        self
    }

    /// Send `Authorization: apikey <key>` with every request.
    ///
    /// # Example
    ///
    /// ```
    /// use axerve::HyperClient;
    ///
    /// let client = HyperClient::builder()
    ///     .with_api_key_auth("my-api-key")
    ///     .build();
    /// ```
    #[must_use]
    pub fn with_api_key_auth(self, api_key: impl Into<String>) -> Self {
        self.layer(ApiKeyAuthLayer::new(api_key))
    }

    /// Add request/response logging.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Add debug-level logging (includes redacted headers).
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config.build();

        let mut service = BoxCloneService::new(Transport::new(&config));
        if self.default_logging {
            service = BoxCloneService::new(LoggingLayer::new().layer(service));
        }
        for wrap in self.layers {
            service = wrap(service);
        }

        HyperClient {
            service: SharedService(Arc::new(Mutex::new(service))),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_default() {
        let client = HyperClient::new();
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_builder() {
        let client = HyperClient::builder()
            .timeout(Duration::from_secs(60))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(client.config().timeout, Duration::from_secs(60));
        assert_eq!(client.config().pool_idle_per_host, 16);
    }

    #[test]
    fn client_from_borrowed_config() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(5))
            .build();
        let client = HyperClient::with_config(&config);

        assert_eq!(client.config().timeout, config.timeout);
        assert_eq!(client.config().pool_idle_per_host, 32);
    }

    #[test]
    fn client_builder_from_config() {
        let config = ClientConfig::builder()
            .connect_timeout(Duration::from_secs(2))
            .build();
        let client = HyperClient::builder()
            .config(&config)
            .with_api_key_auth("key")
            .with_logging()
            .build();

        assert_eq!(client.config().connect_timeout, Duration::from_secs(2));
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_debug_counts_layers() {
        let builder = HyperClient::builder().with_defaults().with_logging();
        let debug = format!("{builder:?}");
        assert!(debug.contains("layers: 1"));
        assert!(debug.contains("default_logging: true"));
    }

    #[test]
    fn client_is_debug() {
        let client = HyperClient::new();
        let debug = format!("{client:?}");
        assert!(debug.contains("HyperClient"));
    }
}

//! API key authentication middleware.
//!
//! Adds an `Authorization: apikey <key>` header to all outgoing requests.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{HeaderValue, header};
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Layer that authenticates requests with an Axerve API key.
///
/// A key that cannot be sent as a header value fails every request with
/// [`Error::InvalidConfig`].
///
/// # Example
///
/// ```
/// use axerve::middleware::{ApiKeyAuthLayer, ServiceBuilder};
/// use axerve::HyperClient;
///
/// let service = ServiceBuilder::new()
///     .layer(ApiKeyAuthLayer::new("my-api-key"))
///     .service(HyperClient::new());
/// ```
#[derive(Clone)]
pub struct ApiKeyAuthLayer {
    header: Option<HeaderValue>,
}

impl ApiKeyAuthLayer {
    /// Create a new API key layer.
    pub fn new(api_key: impl Into<String>) -> Self {
        let header = HeaderValue::try_from(format!("apikey {}", api_key.into()))
            .ok()
            .map(|mut value| {
                value.set_sensitive(true);
                value
            });
        Self { header }
    }
}

impl fmt::Debug for ApiKeyAuthLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthLayer")
            .field("valid", &self.header.is_some())
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for ApiKeyAuthLayer {
    type Service = ApiKeyAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuth {
            inner,
            header: self.header.clone(),
        }
    }
}

/// Service that adds the `Authorization` header to requests.
#[derive(Clone)]
pub struct ApiKeyAuth<S> {
    inner: S,
    header: Option<HeaderValue>,
}

impl<S: fmt::Debug> fmt::Debug for ApiKeyAuth<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request<Bytes>> for ApiKeyAuth<S>
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

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        let Some(value) = self.header.clone() else {
            return Box::pin(async {
                Err(Error::invalid_config("API key is not a valid header value"))
            });
        };
        request.headers_mut().insert(header::AUTHORIZATION, value);

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}

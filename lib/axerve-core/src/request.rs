//! Outgoing gateway requests.
//!
//! A [`Request`] is assembled once with [`Request::builder`] and then only
//! touched by middleware, which may add headers or read extensions.
//!
//! # Example
//!
//! ```
//! use axerve_core::{Method, Request, header};
//! use bytes::Bytes;
//!
//! let url = "https://sandbox.gestpay.net/api/v1/payment/detail/123".parse().unwrap();
//! let request = Request::<Bytes>::builder(Method::Get, url)
//!     .header(header::ACCEPT, header::HeaderValue::from_static("application/json"))
//!     .build();
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use bytes::Bytes;
use http::{Extensions, HeaderMap, HeaderName, HeaderValue, header};

use crate::Method;

/// Method, URL, headers, optional body and typed extensions of one call.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HeaderMap,
    body: Option<B>,
    extensions: Extensions,
}

impl<B> Request<B> {
    /// Start building a request.
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder {
            request: Self {
                method,
                url,
                headers: HeaderMap::new(),
                body: None,
                extensions: Extensions::new(),
            },
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL, query included.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// All headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Middleware uses this to add headers such as `Authorization`.
    #[must_use]
    pub const fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Header value by name, when it is visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Typed values attached with [`RequestBuilder::extension`].
    #[must_use]
    pub const fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Split the request for the transport.
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HeaderMap, Option<B>, Extensions) {
        (
            self.method,
            self.url,
            self.headers,
            self.body,
            self.extensions,
        )
    }
}

/// Builder returned by [`Request::builder`].
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    request: Request<B>,
}

impl<B> RequestBuilder<B> {
    /// Set a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.request.headers.insert(name, value);
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.request.body = Some(body);
        self
    }

    /// Attach a typed value that middleware can read back.
    #[must_use]
    pub fn extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.request.extensions.insert(value);
        self
    }

    /// Finish the request.
    #[must_use]
    pub fn build(self) -> Request<B> {
        self.request
    }
}

impl RequestBuilder<Bytes> {
    /// Serialize `value` as the body and set `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )
            .body(body))
    }
}

//! HTTP response handling.
//!
//! [`Response`] provides access to status, headers, and body. Gateway responses
//! are read with [`Response::into_payload`], which decodes the body and then
//! classifies the status, or [`Response::into_envelope`] which also wraps the
//! body in a [`ResponseEnvelope`].
//!
//! # Example
//!
//! ```
//! use axerve_core::{HeaderMap, Response, VariantKind};
//! use bytes::Bytes;
//!
//! let body = Bytes::from(r#"{"error":{"code":"0"},"payload":{"paymentID":"X"}}"#);
//! let envelope = Response::new(200, HeaderMap::new(), body)
//!     .into_envelope(VariantKind::Detail)
//!     .expect("success");
//! assert_eq!(envelope.payment_id(), Some("X"));
//! ```

use bytes::Bytes;
use http::HeaderMap;

use crate::{Error, RawPayload, ResponseEnvelope, VariantKind, classify, from_json};

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HeaderMap,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value by name, when it is visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        from_json(self.status, &self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Decode the body as a JSON object, then classify the status.
    ///
    /// The body is decoded first, so an undecodable error page is reported as
    /// [`Error::MalformedResponse`] whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if the body is not a JSON object,
    /// or the classified error when the status is 400 or above.
    pub fn into_payload(self) -> crate::Result<RawPayload> {
        let body: RawPayload = self.json()?;
        match classify(self.status, &body) {
            Some(classified) => Err(Error::from(classified)),
            None => Ok(body),
        }
    }

    /// Decode, classify, and wrap the body as `kind`.
    ///
    /// # Errors
    ///
    /// See [`Response::into_payload`].
    pub fn into_envelope(self, kind: VariantKind) -> crate::Result<ResponseEnvelope> {
        self.into_payload()
            .map(|raw| ResponseEnvelope::new(raw, kind))
    }
}

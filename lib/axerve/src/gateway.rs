//! Axerve gateway client.
//!
//! [`AxerveClient`] pairs an [`HttpClient`] with a [`GatewayConfig`] and runs
//! every call through the same pipeline: build the URL and headers, send,
//! decode the body, classify the status, and hand back a [`ResponseEnvelope`]
//! or the raw object.

use std::sync::Arc;

use axerve_core::{PathTemplate, RawPayload, ResponseEnvelope, VariantKind};
use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{Check, Payment, Shop};
use crate::config::{Environment, GatewayConfig};
use crate::{Error, HeaderValue, HttpClient, HyperClient, Method, Request, Result, header};

const APPLICATION_JSON: &str = "application/json";

/// Encodes everything outside unreserved characters and sub-delimiters.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// A gateway endpoint: its template and the resolved path and query.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    template: &'static str,
    path: String,
    query: Option<(&'static str, String)>,
}

impl Endpoint {
    pub(crate) fn new(template: &'static str) -> Self {
        Self {
            template,
            path: template.to_string(),
            query: None,
        }
    }

    /// Substitute `{name}` with the percent-encoded `value`.
    pub(crate) fn param(mut self, name: &str, value: &str) -> Self {
        let placeholder = format!("{{{name}}}");
        let encoded = utf8_percent_encode(value, PATH_SEGMENT_ENCODE_SET).to_string();
        self.path = self.path.replace(&placeholder, &encoded);
        self
    }

    /// Set the query parameter; `None` and empty values are left out.
    pub(crate) fn query(mut self, name: &'static str, value: Option<&str>) -> Self {
        self.query = value
            .filter(|value| !value.is_empty())
            .map(|value| (name, value.to_string()));
        self
    }

    pub(crate) fn template(&self) -> &'static str {
        self.template
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }
}

/// Client for the Axerve REST API.
///
/// Endpoints are grouped by router: [`payment`](Self::payment),
/// [`check`](Self::check) and [`shop`](Self::shop).
///
/// # Example
///
/// ```no_run
/// use axerve::{AxerveClient, GatewayConfig};
/// use serde_json::json;
///
/// # async fn run() -> axerve::Result<()> {
/// let config = GatewayConfig::builder()
///     .api_key("my-api-key")
///     .shop_login("GESPAY12345")
///     .build()?;
/// let client = AxerveClient::new(config);
///
/// let created = client
///     .payment()
///     .create(&json!({"amount": "10.00", "currency": "EUR", "shopTransactionID": "order-1"}))
///     .await?;
///
/// if created.is_redirect() {
///     println!("send the buyer to {:?}", created.redirect_url());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AxerveClient<C = HyperClient> {
    http: C,
    config: Arc<GatewayConfig>,
}

impl<C: Clone> Clone for AxerveClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl AxerveClient<HyperClient> {
    /// Create a client over a [`HyperClient`] that authenticates with the
    /// configured API key and logs each exchange.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let http = HyperClient::builder()
            .config(config.client())
            .with_defaults()
            .with_api_key_auth(config.api_key())
            .build();
        Self::with_http_client(http, config)
    }
}

impl<C> AxerveClient<C> {
    /// Create a client over a custom transport.
    ///
    /// The transport is responsible for authentication, for example through
    /// [`HyperClientBuilder::with_api_key_auth`](crate::HyperClientBuilder::with_api_key_auth).
    #[must_use]
    pub fn with_http_client(http: C, config: GatewayConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    /// The gateway configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Base URL, without the API version.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// API version path segment.
    #[must_use]
    pub fn api_version(&self) -> &str {
        self.config.api_version()
    }

    /// Merchant shop login.
    #[must_use]
    pub fn shop_login(&self) -> &str {
        self.config.shop_login()
    }

    /// Target environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.config.environment()
    }

    /// The underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &C {
        &self.http
    }

    /// Payment endpoints.
    #[must_use]
    pub const fn payment(&self) -> Payment<'_, C> {
        Payment::new(self)
    }

    /// Card check endpoints.
    #[must_use]
    pub const fn check(&self) -> Check<'_, C> {
        Check::new(self)
    }

    /// Shop endpoints.
    #[must_use]
    pub const fn shop(&self) -> Shop<'_, C> {
        Shop::new(self)
    }

    /// Full URL of `endpoint`: `{base}/{version}{path}`.
    pub(crate) fn url(&self, endpoint: &Endpoint) -> Result<url::Url> {
        let path = endpoint.path();
        let separator = if path.starts_with('/') { "" } else { "/" };
        let raw = format!(
            "{}/{}{separator}{path}",
            self.config.base_url(),
            self.config.api_version()
        );

        let mut url = url::Url::parse(&raw)?;
        if let Some((name, value)) = &endpoint.query {
            url.query_pairs_mut().append_pair(name, value);
        }
        Ok(url)
    }

    /// Serialize `data` to a JSON object and fill in `shopLogin` when missing.
    pub(crate) fn request_body<T>(&self, data: &T) -> Result<RawPayload>
    where
        T: Serialize + ?Sized,
    {
        let Value::Object(mut body) = serde_json::to_value(data)? else {
            return Err(Error::invalid_request("request body must be a JSON object"));
        };

        if body.get("shopLogin").is_none_or(Value::is_null) {
            body.insert(
                "shopLogin".to_string(),
                Value::String(self.config.shop_login().to_string()),
            );
        }

        Ok(body)
    }
}

impl<C: HttpClient> AxerveClient<C> {
    /// Send one request and return the decoded body of a non-failing status.
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&RawPayload>,
    ) -> Result<RawPayload> {
        let url = self.url(endpoint)?;
        let user_agent = HeaderValue::from_str(self.config.user_agent())
            .map_err(|e| Error::invalid_config(format!("user agent: {e}")))?;
        let json = HeaderValue::from_static(APPLICATION_JSON);
        let mut builder = Request::<Bytes>::builder(method, url)
            .header(header::CONTENT_TYPE, json.clone())
            .header(header::ACCEPT, json)
            .header(header::USER_AGENT, user_agent)
            .extension(PathTemplate::new(endpoint.template()));
        if let Some(body) = body {
            builder = builder.json(body)?;
        }

        let response = self.http.execute(builder.build()).await?;
        let status = response.status();

        response.into_payload().inspect_err(|err| {
            warn!(
                endpoint = endpoint.template(),
                status,
                kind = ?err.kind(),
                error = %err,
                "gateway call failed"
            );
        })
    }

    async fn send_envelope(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&RawPayload>,
        kind: VariantKind,
    ) -> Result<ResponseEnvelope> {
        let envelope = ResponseEnvelope::new(self.send(method, endpoint, body).await?, kind);

        if envelope.has_error() {
            debug!(
                endpoint = endpoint.template(),
                code = ?envelope.error_code(),
                message = ?envelope.error_message(),
                "gateway reported an error"
            );
        }

        Ok(envelope)
    }

    /// POST `body` and wrap the answer as `kind`.
    pub(crate) async fn post(
        &self,
        endpoint: Endpoint,
        body: RawPayload,
        kind: VariantKind,
    ) -> Result<ResponseEnvelope> {
        self.send_envelope(Method::Post, &endpoint, Some(&body), kind)
            .await
    }

    /// GET and wrap the answer as `kind`.
    pub(crate) async fn get(
        &self,
        endpoint: Endpoint,
        kind: VariantKind,
    ) -> Result<ResponseEnvelope> {
        self.send_envelope(Method::Get, &endpoint, None, kind).await
    }

    /// GET and return the decoded body as is.
    pub(crate) async fn get_raw(&self, endpoint: Endpoint) -> Result<RawPayload> {
        self.send(Method::Get, &endpoint, None).await
    }
}

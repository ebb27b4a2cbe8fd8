//! `/payment` endpoints.

use axerve_core::{RawPayload, ResponseEnvelope, VariantKind};
use serde::Serialize;
use serde_json::Value;

use crate::gateway::{AxerveClient, Endpoint};
use crate::{Error, HttpClient, Result};

/// Request keys that identify a transaction for [`Payment::retrieve_details`].
///
/// A key counts only when filled: `null`, `""`, `"0"`, `0` and `false` are
/// treated as absent.
pub const LOOKUP_KEYS: [&str; 3] = ["shopTransactionID", "bankTransactionID", "paymentID"];

/// Payment endpoints of an [`AxerveClient`].
///
/// Request bodies are any value serializing to a JSON object; `shopLogin` is
/// added from the configuration when absent.
#[derive(Debug)]
pub struct Payment<'a, C> {
    client: &'a AxerveClient<C>,
}

impl<'a, C> Payment<'a, C> {
    pub(crate) const fn new(client: &'a AxerveClient<C>) -> Self {
        Self { client }
    }
}

impl<C: HttpClient> Payment<'_, C> {
    /// Create a payment (`POST /payment/create`).
    ///
    /// The answer carries a [`CreationPayload`](axerve_core::CreationPayload).
    pub async fn create<T>(&self, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        let body = self.client.request_body(data)?;
        let endpoint = Endpoint::new("/payment/create");
        self.client
            .post(endpoint, body, VariantKind::Creation)
            .await
    }

    /// Submit a payment (`POST /payment/submit`), with an optional
    /// `paymentToken` query parameter.
    pub async fn submit<T>(&self, data: &T, payment_token: Option<&str>) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        let body = self.client.request_body(data)?;
        let endpoint = Endpoint::new("/payment/submit").query("paymentToken", payment_token);
        self.client.post(endpoint, body, VariantKind::Detail).await
    }

    /// Update a payment (`POST /payment/update`).
    pub async fn update<T>(&self, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        self.detail_call("/payment/update", data).await
    }

    /// Capture an authorized payment (`POST /payment/capture`).
    pub async fn capture<T>(&self, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        self.detail_call("/payment/capture", data).await
    }

    /// Cancel a payment (`POST /payment/cancel`).
    pub async fn cancel<T>(&self, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        self.detail_call("/payment/cancel", data).await
    }

    /// Refund a payment (`POST /payment/refund`).
    pub async fn refund<T>(&self, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        self.detail_call("/payment/refund", data).await
    }

    /// Payment methods available for a payment
    /// (`GET /payment/methods/{paymentID}/{languageId}`).
    pub async fn methods(
        &self,
        payment_id: &str,
        language_id: &str,
        payment_token: Option<&str>,
    ) -> Result<RawPayload> {
        let endpoint = Endpoint::new("/payment/methods/{paymentID}/{languageId}")
            .param("paymentID", payment_id)
            .param("languageId", language_id)
            .query("paymentToken", payment_token);
        self.client.get_raw(endpoint).await
    }

    /// Payment detail by identifier (`GET /payment/detail/{paymentID}`).
    pub async fn detail(
        &self,
        payment_id: &str,
        payment_token: Option<&str>,
    ) -> Result<ResponseEnvelope> {
        let endpoint = Endpoint::new("/payment/detail/{paymentID}")
            .param("paymentID", payment_id)
            .query("paymentToken", payment_token);
        self.client.get(endpoint, VariantKind::Detail).await
    }

    /// Payment detail by search keys (`POST /payment/detail`).
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRequest`], without calling the gateway, unless
    /// one of [`LOOKUP_KEYS`] is filled.
    pub async fn retrieve_details<T>(&self, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        let body = self.client.request_body(data)?;
        if !has_lookup_key(&body) {
            return Err(Error::invalid_request(format!(
                "one of {} is required",
                LOOKUP_KEYS.join(", ")
            )));
        }

        self.client
            .post(Endpoint::new("/payment/detail"), body, VariantKind::Detail)
            .await
    }

    async fn detail_call<T>(&self, template: &'static str, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        let body = self.client.request_body(data)?;
        self.client
            .post(Endpoint::new(template), body, VariantKind::Detail)
            .await
    }
}

fn has_lookup_key(body: &RawPayload) -> bool {
    LOOKUP_KEYS
        .iter()
        .any(|key| body.get(*key).is_some_and(is_filled))
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

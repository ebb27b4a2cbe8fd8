//! Response envelope: the decoded body with its typed payload.
//!
//! A gateway body looks like `{ "payload"?: {...}, "error"?: {"code", "description"} }`.
//! [`ResponseEnvelope`] keeps the raw body, builds the [`Payload`] shape the
//! caller asked for, and answers the error/success/redirect questions the same
//! way whatever the shape.
//!
//! # Example
//!
//! ```
//! use axerve_core::{ResponseEnvelope, VariantKind};
//! use serde_json::json;
//!
//! let body = json!({
//!     "payload": {"paymentID": "X", "paymentToken": "T", "userRedirect": {"href": "https://x"}}
//! });
//! let envelope = ResponseEnvelope::new(body.as_object().cloned().unwrap(), VariantKind::Creation);
//!
//! assert!(envelope.is_successful());
//! assert_eq!(envelope.redirect_url(), Some("https://x"));
//! assert_eq!(envelope.get("paymentID").and_then(|v| v.as_str()), Some("X"));
//! ```

use serde_json::Value;

use crate::RawPayload;
use crate::error::UNKNOWN_ERROR_MESSAGE;
use crate::field::{self, FieldValue};
use crate::payload::{CardData, CreationPayload, DetailPayload, Payload, PaymentEvent, VariantKind};

/// In-band gateway error, from the body's `error` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    code: String,
    description: String,
}

impl ErrorInfo {
    /// Read the in-band error of a body.
    ///
    /// Present when `error` is an object with a non-null `code` that is not the
    /// JSON string `"0"`. The comparison is on the JSON value: a numeric `0` is
    /// an error code.
    #[must_use]
    pub fn from_body(body: &RawPayload) -> Option<Self> {
        let error = body.get("error")?.as_object()?;
        let code = error.get("code").filter(|code| !code.is_null())?;
        if code.as_str() == Some("0") {
            return None;
        }

        Some(Self {
            code: field::text(code).unwrap_or_else(|| code.to_string()),
            description: error
                .get("description")
                .and_then(field::text)
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        })
    }

    /// Gateway error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Gateway description, or [`UNKNOWN_ERROR_MESSAGE`].
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A decoded gateway response with its typed payload.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    raw: RawPayload,
    kind: VariantKind,
    payload: Option<Payload>,
    error: Option<ErrorInfo>,
}

impl ResponseEnvelope {
    /// Wrap a decoded body, building the payload of the given shape.
    ///
    /// The payload stays unset when `payload` is missing or not an object.
    #[must_use]
    pub fn new(raw: RawPayload, kind: VariantKind) -> Self {
        let payload = raw
            .get("payload")
            .and_then(Value::as_object)
            .map(|payload| Payload::from_raw(kind, payload));
        let error = ErrorInfo::from_body(&raw);

        Self {
            raw,
            kind,
            payload,
            error,
        }
    }

    /// The shape requested at construction.
    #[must_use]
    pub const fn kind(&self) -> VariantKind {
        self.kind
    }

    /// The whole decoded body.
    #[must_use]
    pub const fn raw(&self) -> &RawPayload {
        &self.raw
    }

    /// Consume into the decoded body.
    #[must_use]
    pub fn into_raw(self) -> RawPayload {
        self.raw
    }

    /// The body's `payload` object, untyped.
    #[must_use]
    pub fn payload_raw(&self) -> Option<&RawPayload> {
        self.raw.get("payload").and_then(Value::as_object)
    }

    /// The typed payload.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// The creation payload, for creation envelopes.
    #[must_use]
    pub fn creation(&self) -> Option<&CreationPayload> {
        self.payload.as_ref().and_then(Payload::as_creation)
    }

    /// The detail payload, for detail envelopes.
    #[must_use]
    pub fn detail(&self) -> Option<&DetailPayload> {
        self.payload.as_ref().and_then(Payload::as_detail)
    }

    /// Returns `true` if the gateway reported an in-band error.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The in-band error.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// In-band error code.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(ErrorInfo::code)
    }

    /// In-band error description, defaulting to [`UNKNOWN_ERROR_MESSAGE`].
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(ErrorInfo::description)
    }

    /// No in-band error, a payload, and (for detail) an `OK`/`APPROVED` result.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        !self.has_error() && self.payload.as_ref().is_some_and(Payload::is_successful)
    }

    /// Returns `true` if a creation response asks to redirect the buyer.
    ///
    /// Always `false` for detail envelopes and for envelopes with an error.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        !self.has_error() && self.creation().is_some_and(CreationPayload::has_redirect)
    }

    /// Redirect target, when [`Self::is_redirect`] holds.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        if self.is_redirect() {
            self.creation().and_then(CreationPayload::redirect_url)
        } else {
            None
        }
    }

    /// `paymentID` of the payload.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payload.as_ref().and_then(Payload::payment_id)
    }

    /// `paymentToken` of a creation payload.
    #[must_use]
    pub fn payment_token(&self) -> Option<&str> {
        self.creation().and_then(CreationPayload::payment_token)
    }

    /// `shopTransactionID` of a detail payload.
    #[must_use]
    pub fn shop_transaction_id(&self) -> Option<&str> {
        self.detail().and_then(DetailPayload::shop_transaction_id)
    }

    /// `bankTransactionID` of a detail payload.
    #[must_use]
    pub fn bank_transaction_id(&self) -> Option<&str> {
        self.detail().and_then(DetailPayload::bank_transaction_id)
    }

    /// `paymentMethod` of a detail payload.
    #[must_use]
    pub fn payment_method(&self) -> Option<&str> {
        self.detail().and_then(DetailPayload::payment_method)
    }

    /// `amount` of a detail payload, as sent.
    #[must_use]
    pub fn amount(&self) -> Option<&str> {
        self.detail().and_then(DetailPayload::amount)
    }

    /// `currency` of a detail payload.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.detail().and_then(DetailPayload::currency)
    }

    /// `transactionResult` of a detail payload.
    #[must_use]
    pub fn transaction_result(&self) -> Option<&str> {
        self.detail().and_then(DetailPayload::transaction_result)
    }

    /// `cardData` of a detail payload.
    #[must_use]
    pub fn card_data(&self) -> Option<CardData> {
        self.detail().and_then(DetailPayload::card_data)
    }

    /// `events` of a detail payload.
    #[must_use]
    pub fn events(&self) -> Option<Vec<PaymentEvent>> {
        self.detail().and_then(DetailPayload::events)
    }

    /// `customInfo` of a detail payload, as received.
    #[must_use]
    pub fn custom_info(&self) -> Option<&Value> {
        self.detail().and_then(DetailPayload::custom_info)
    }

    /// Read a payload field by its upstream name.
    ///
    /// Forwards to the held payload shape. Resolves only the fields that shape
    /// declares; undeclared names and a missing payload give `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldValue<'_>> {
        self.payload.as_ref().and_then(|p| p.field(name))
    }

    /// Returns `true` if [`Self::get`] would return a value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set payload fields as a JSON object.
    #[must_use]
    pub fn to_map(&self) -> Option<RawPayload> {
        self.payload.as_ref().map(Payload::to_map)
    }
}

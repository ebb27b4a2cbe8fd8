//! Payload returned by payment creation.

use serde_json::Value;

use crate::field::{self, FieldKind, FieldRecord, FieldValue};

/// Payload of a `payment/create` response.
///
/// Carries the token used by follow-up calls and, for payment methods that
/// need it, the URL the buyer must be sent to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreationPayload {
    payment_token: Option<String>,
    payment_id: Option<String>,
    user_redirect: Option<Value>,
}

impl FieldRecord for CreationPayload {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("paymentToken", FieldKind::Text),
        ("paymentID", FieldKind::Text),
        ("userRedirect", FieldKind::Structured),
    ];

    fn assign(&mut self, name: &str, value: &Value) {
        match name {
            "paymentToken" => self.payment_token = field::text(value),
            "paymentID" => self.payment_id = field::text(value),
            "userRedirect" => self.user_redirect = field::structured(value),
            _ => {}
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "paymentToken" => self.payment_token.as_deref().map(FieldValue::Text),
            "paymentID" => self.payment_id.as_deref().map(FieldValue::Text),
            "userRedirect" => self.user_redirect.as_ref().map(FieldValue::Structured),
            _ => None,
        }
    }
}

impl CreationPayload {
    /// Payment token (`paymentToken`).
    #[must_use]
    pub fn payment_token(&self) -> Option<&str> {
        self.payment_token.as_deref()
    }

    /// Payment identifier (`paymentID`).
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    /// Raw `userRedirect` object.
    #[must_use]
    pub const fn user_redirect_raw(&self) -> Option<&Value> {
        self.user_redirect.as_ref()
    }

    /// Typed view of `userRedirect`.
    #[must_use]
    pub fn user_redirect(&self) -> Option<UserRedirect> {
        self.user_redirect.as_ref().and_then(field::map_value)
    }

    /// `userRedirect.href`, when it is a string.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.user_redirect
            .as_ref()
            .and_then(|redirect| redirect.get("href"))
            .and_then(Value::as_str)
    }

    /// Returns `true` if `userRedirect.href` is a non-empty string.
    #[must_use]
    pub fn has_redirect(&self) -> bool {
        self.redirect_url().is_some_and(|href| !href.is_empty())
    }
}

/// The `userRedirect` object of a creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRedirect {
    href: Option<String>,
}

impl FieldRecord for UserRedirect {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[("href", FieldKind::Text)];

    fn assign(&mut self, name: &str, value: &Value) {
        if name == "href" {
            self.href = field::text(value);
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "href" => self.href.as_deref().map(FieldValue::Text),
            _ => None,
        }
    }
}

impl UserRedirect {
    /// Redirect target.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> CreationPayload {
        field::map_value(&value).expect("object")
    }

    #[test]
    fn maps_creation_fields() {
        let payload = payload(json!({
            "paymentToken": "T",
            "paymentID": "X",
            "userRedirect": {"href": "https://x"},
            "transactionResult": "OK",
        }));

        check!(payload.payment_token() == Some("T"));
        check!(payload.payment_id() == Some("X"));
        check!(payload.redirect_url() == Some("https://x"));
        let_assert!(Some(redirect) = payload.user_redirect());
        check!(redirect.href() == Some("https://x"));
        check!(!payload.is_set("transactionResult"));
    }

    #[test]
    fn has_redirect_requires_non_empty_href() {
        check!(payload(json!({"userRedirect": {"href": "https://x"}})).has_redirect());

        check!(!payload(json!({})).has_redirect());
        check!(!payload(json!({"userRedirect": {}})).has_redirect());
        check!(!payload(json!({"userRedirect": {"href": ""}})).has_redirect());
        check!(!payload(json!({"userRedirect": {"href": null}})).has_redirect());
        check!(!payload(json!({"userRedirect": null})).has_redirect());
    }

    #[test]
    fn empty_href_is_still_reported() {
        let payload = payload(json!({"userRedirect": {"href": ""}}));
        check!(payload.redirect_url() == Some(""));
    }

    #[test]
    fn fieldless_map_yields_unset_payload() {
        let payload = payload(json!({}));

        check!(payload == CreationPayload::default());
        check!(payload.payment_token().is_none());
        check!(payload.user_redirect().is_none());
    }

    #[test]
    fn to_map_uses_upstream_names() {
        let payload = payload(json!({"paymentID": "X", "unknown": 1}));
        check!(Value::Object(payload.to_map()) == json!({"paymentID": "X"}));
    }
}

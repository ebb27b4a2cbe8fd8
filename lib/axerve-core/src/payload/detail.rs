//! Payload returned by transaction detail calls.

use serde_json::Value;

use crate::field::{self, FieldKind, FieldRecord, FieldValue};

/// `transactionResult` values that mean the transaction went through.
pub const SUCCESSFUL_RESULTS: [&str; 2] = ["OK", "APPROVED"];

/// Payload of a transaction detail response (`payment/detail`, `submit`,
/// `capture`, `refund`, …).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPayload {
    payment_id: Option<String>,
    shop_transaction_id: Option<String>,
    bank_transaction_id: Option<String>,
    authorization_code: Option<String>,
    payment_method: Option<String>,
    token: Option<String>,
    transaction_type: Option<String>,
    transaction_result: Option<String>,
    transaction_error_code: Option<String>,
    transaction_error_description: Option<String>,
    custom_info: Option<Value>,
    currency: Option<String>,
    amount: Option<String>,
    events: Option<Value>,
    card_data: Option<Value>,
}

impl FieldRecord for DetailPayload {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("paymentID", FieldKind::Text),
        ("shopTransactionID", FieldKind::Text),
        ("bankTransactionID", FieldKind::Text),
        ("authorizationCode", FieldKind::Text),
        ("paymentMethod", FieldKind::Text),
        ("token", FieldKind::Text),
        ("transactionType", FieldKind::Text),
        ("transactionResult", FieldKind::Text),
        ("transactionErrorCode", FieldKind::Text),
        ("transactionErrorDescription", FieldKind::Text),
        ("customInfo", FieldKind::Structured),
        ("currency", FieldKind::Text),
        ("amount", FieldKind::Text),
        ("events", FieldKind::Structured),
        ("cardData", FieldKind::Structured),
    ];

    fn assign(&mut self, name: &str, value: &Value) {
        let slot = match name {
            "paymentID" => &mut self.payment_id,
            "shopTransactionID" => &mut self.shop_transaction_id,
            "bankTransactionID" => &mut self.bank_transaction_id,
            "authorizationCode" => &mut self.authorization_code,
            "paymentMethod" => &mut self.payment_method,
            "token" => &mut self.token,
            "transactionType" => &mut self.transaction_type,
            "transactionResult" => &mut self.transaction_result,
            "transactionErrorCode" => &mut self.transaction_error_code,
            "transactionErrorDescription" => &mut self.transaction_error_description,
            "currency" => &mut self.currency,
            "amount" => &mut self.amount,
            "customInfo" => {
                self.custom_info = field::structured(value);
                return;
            }
            "events" => {
                self.events = field::structured(value);
                return;
            }
            "cardData" => {
                self.card_data = field::structured(value);
                return;
            }
            _ => return,
        };
        *slot = field::text(value);
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let text = match name {
            "paymentID" => &self.payment_id,
            "shopTransactionID" => &self.shop_transaction_id,
            "bankTransactionID" => &self.bank_transaction_id,
            "authorizationCode" => &self.authorization_code,
            "paymentMethod" => &self.payment_method,
            "token" => &self.token,
            "transactionType" => &self.transaction_type,
            "transactionResult" => &self.transaction_result,
            "transactionErrorCode" => &self.transaction_error_code,
            "transactionErrorDescription" => &self.transaction_error_description,
            "currency" => &self.currency,
            "amount" => &self.amount,
            "customInfo" => return self.custom_info.as_ref().map(FieldValue::Structured),
            "events" => return self.events.as_ref().map(FieldValue::Structured),
            "cardData" => return self.card_data.as_ref().map(FieldValue::Structured),
            _ => return None,
        };
        text.as_deref().map(FieldValue::Text)
    }
}

impl DetailPayload {
    /// Payment identifier (`paymentID`).
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    /// Merchant-side transaction identifier (`shopTransactionID`).
    #[must_use]
    pub fn shop_transaction_id(&self) -> Option<&str> {
        self.shop_transaction_id.as_deref()
    }

    /// Bank-side transaction identifier (`bankTransactionID`).
    #[must_use]
    pub fn bank_transaction_id(&self) -> Option<&str> {
        self.bank_transaction_id.as_deref()
    }

    /// Authorization code (`authorizationCode`).
    #[must_use]
    pub fn authorization_code(&self) -> Option<&str> {
        self.authorization_code.as_deref()
    }

    /// Payment method (`paymentMethod`).
    #[must_use]
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    /// Card token (`token`).
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Transaction type (`transactionType`).
    #[must_use]
    pub fn transaction_type(&self) -> Option<&str> {
        self.transaction_type.as_deref()
    }

    /// Transaction result (`transactionResult`).
    #[must_use]
    pub fn transaction_result(&self) -> Option<&str> {
        self.transaction_result.as_deref()
    }

    /// Transaction error code (`transactionErrorCode`).
    #[must_use]
    pub fn transaction_error_code(&self) -> Option<&str> {
        self.transaction_error_code.as_deref()
    }

    /// Transaction error description (`transactionErrorDescription`).
    #[must_use]
    pub fn transaction_error_description(&self) -> Option<&str> {
        self.transaction_error_description.as_deref()
    }

    /// Merchant custom information (`customInfo`).
    #[must_use]
    pub const fn custom_info(&self) -> Option<&Value> {
        self.custom_info.as_ref()
    }

    /// Currency (`currency`).
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Amount (`amount`).
    #[must_use]
    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    /// Raw `events` value.
    #[must_use]
    pub const fn events_raw(&self) -> Option<&Value> {
        self.events.as_ref()
    }

    /// Raw `cardData` value.
    #[must_use]
    pub const fn card_data_raw(&self) -> Option<&Value> {
        self.card_data.as_ref()
    }

    /// Typed view of `cardData`.
    #[must_use]
    pub fn card_data(&self) -> Option<CardData> {
        self.card_data.as_ref().and_then(field::map_value)
    }

    /// Typed view of `events`, one entry per `events[].event` object.
    ///
    /// `None` when `events` is unset; entries without an `event` object are skipped.
    #[must_use]
    pub fn events(&self) -> Option<Vec<PaymentEvent>> {
        let entries: Vec<&Value> = match self.events.as_ref()? {
            Value::Array(items) => items.iter().collect(),
            Value::Object(items) => items.values().collect(),
            _ => Vec::new(),
        };

        Some(
            entries
                .into_iter()
                .filter_map(|entry| entry.get("event"))
                .filter_map(field::map_value::<PaymentEvent>)
                .collect(),
        )
    }

    /// Returns `true` if `transactionResult` is exactly `OK` or `APPROVED`.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.transaction_result
            .as_deref()
            .is_some_and(|result| SUCCESSFUL_RESULTS.contains(&result))
    }
}

/// The `cardData` object of a detail payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardData {
    circuit: Option<String>,
    pan: Option<String>,
    expiry_month: Option<String>,
    expiry_year: Option<String>,
}

impl FieldRecord for CardData {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("circuit", FieldKind::Text),
        ("pan", FieldKind::Text),
        ("expiryMonth", FieldKind::Text),
        ("expiryYear", FieldKind::Text),
    ];

    fn assign(&mut self, name: &str, value: &Value) {
        let slot = match name {
            "circuit" => &mut self.circuit,
            "pan" => &mut self.pan,
            "expiryMonth" => &mut self.expiry_month,
            "expiryYear" => &mut self.expiry_year,
            _ => return,
        };
        *slot = field::text(value);
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let text = match name {
            "circuit" => &self.circuit,
            "pan" => &self.pan,
            "expiryMonth" => &self.expiry_month,
            "expiryYear" => &self.expiry_year,
            _ => return None,
        };
        text.as_deref().map(FieldValue::Text)
    }
}

impl CardData {
    /// Card circuit (`circuit`).
    #[must_use]
    pub fn circuit(&self) -> Option<&str> {
        self.circuit.as_deref()
    }

    /// Masked card number (`pan`).
    #[must_use]
    pub fn pan(&self) -> Option<&str> {
        self.pan.as_deref()
    }

    /// Expiry month (`expiryMonth`).
    #[must_use]
    pub fn expiry_month(&self) -> Option<&str> {
        self.expiry_month.as_deref()
    }

    /// Expiry year (`expiryYear`).
    #[must_use]
    pub fn expiry_year(&self) -> Option<&str> {
        self.expiry_year.as_deref()
    }
}

/// One `events[].event` entry of a detail payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentEvent {
    date: Option<String>,
    kind: Option<String>,
    status: Option<String>,
}

impl FieldRecord for PaymentEvent {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("eventdate", FieldKind::Text),
        ("eventtype", FieldKind::Text),
        ("eventStatus", FieldKind::Text),
    ];

    fn assign(&mut self, name: &str, value: &Value) {
        let slot = match name {
            "eventdate" => &mut self.date,
            "eventtype" => &mut self.kind,
            "eventStatus" => &mut self.status,
            _ => return,
        };
        *slot = field::text(value);
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let text = match name {
            "eventdate" => &self.date,
            "eventtype" => &self.kind,
            "eventStatus" => &self.status,
            _ => return None,
        };
        text.as_deref().map(FieldValue::Text)
    }
}

impl PaymentEvent {
    /// Event date (`eventdate`).
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Event type (`eventtype`).
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Event status (`eventStatus`).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> DetailPayload {
        field::map_value(&value).expect("object")
    }

    #[test]
    fn maps_every_declared_field() {
        let payload = payload(json!({
            "paymentID": "1453989699415",
            "shopTransactionID": "order-1",
            "bankTransactionID": "42",
            "authorizationCode": "A1",
            "paymentMethod": "CREDITCARD",
            "token": "tok",
            "transactionType": "SALE",
            "transactionResult": "OK",
            "transactionErrorCode": "0",
            "transactionErrorDescription": "",
            "customInfo": {"note": "x"},
            "currency": "EUR",
            "amount": "10.00",
            "events": [],
            "cardData": {"circuit": "VISA"},
        }));

        check!(payload.to_map().len() == DetailPayload::FIELDS.len());
        check!(payload.payment_id() == Some("1453989699415"));
        check!(payload.shop_transaction_id() == Some("order-1"));
        check!(payload.bank_transaction_id() == Some("42"));
        check!(payload.authorization_code() == Some("A1"));
        check!(payload.payment_method() == Some("CREDITCARD"));
        check!(payload.token() == Some("tok"));
        check!(payload.transaction_type() == Some("SALE"));
        check!(payload.transaction_error_code() == Some("0"));
        check!(payload.transaction_error_description() == Some(""));
        check!(payload.custom_info() == Some(&json!({"note": "x"})));
        check!(payload.currency() == Some("EUR"));
        check!(payload.amount() == Some("10.00"));
    }

    #[test]
    fn missing_fields_are_unset() {
        let payload = payload(json!({"paymentID": "1"}));

        for (name, _) in DetailPayload::FIELDS {
            check!(payload.is_set(name) == (*name == "paymentID"));
        }
        check!(payload.amount().is_none());
        check!(payload.card_data().is_none());
        check!(payload.events().is_none());
    }

    #[test]
    fn numeric_amount_becomes_text() {
        let payload = payload(json!({"amount": 12.5}));
        check!(payload.amount() == Some("12.5"));
    }

    #[test]
    fn successful_results() {
        check!(payload(json!({"transactionResult": "OK"})).is_successful());
        check!(payload(json!({"transactionResult": "APPROVED"})).is_successful());

        check!(!payload(json!({"transactionResult": "ok"})).is_successful());
        check!(!payload(json!({"transactionResult": "approved"})).is_successful());
        check!(!payload(json!({"transactionResult": "KO"})).is_successful());
        check!(!payload(json!({"transactionResult": "XX"})).is_successful());
        check!(!payload(json!({"transactionResult": ""})).is_successful());
        check!(!payload(json!({})).is_successful());
    }

    #[test]
    fn card_data_view() {
        let payload = payload(json!({
            "cardData": {
                "circuit": "VISA",
                "pan": "************1234",
                "expiryMonth": "05",
                "expiryYear": 2030,
            }
        }));

        let_assert!(Some(card) = payload.card_data());
        check!(card.circuit() == Some("VISA"));
        check!(card.pan() == Some("************1234"));
        check!(card.expiry_month() == Some("05"));
        check!(card.expiry_year() == Some("2030"));
    }

    #[test]
    fn events_view() {
        let payload = payload(json!({
            "events": [
                {"event": {"eventdate": "2024-01-01", "eventtype": "AUTH", "eventStatus": "OK"}},
                {"event": null},
                "garbage",
                {"event": {"eventtype": "SETTLE"}},
            ]
        }));

        let_assert!(Some(events) = payload.events());
        check!(events.len() == 2);
        check!(events.first().and_then(PaymentEvent::date) == Some("2024-01-01"));
        check!(events.first().and_then(PaymentEvent::status) == Some("OK"));
        check!(events.get(1).and_then(PaymentEvent::kind) == Some("SETTLE"));
        check!(events.get(1).and_then(PaymentEvent::date).is_none());
    }

    #[test]
    fn structured_fields_reject_scalars() {
        let payload = payload(json!({"cardData": "VISA", "events": 3}));
        check!(payload.card_data_raw().is_none());
        check!(payload.events_raw().is_none());
    }
}

//! Mapping raw JSON objects onto typed records.
//!
//! A [`FieldRecord`] declares a closed table of upstream field names. [`map_record`]
//! walks a raw object and stores every value whose key is declared and whose
//! JSON type the field accepts; everything else is dropped. Fields that are
//! absent, `null` or of the wrong type stay unset (`None`), never defaulted.
//!
//! # Example
//!
//! ```
//! use axerve_core::{CreationPayload, FieldRecord, map_record};
//! use serde_json::json;
//!
//! let raw = json!({"paymentID": "1", "extra": true, "paymentToken": null});
//! let payload: CreationPayload = map_record(raw.as_object().unwrap());
//!
//! assert_eq!(payload.payment_id(), Some("1"));
//! assert!(!payload.is_set("paymentToken"));
//! assert!(!payload.is_set("extra"));
//! ```

use serde_json::Value;

use crate::RawPayload;

/// JSON shape a declared field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A scalar stored as text: JSON strings, and numbers as their decimal form.
    Text,
    /// A JSON object or array, stored as-is.
    Structured,
}

impl FieldKind {
    /// Returns `true` if `value` can be stored in a field of this kind.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Text => matches!(value, Value::String(_) | Value::Number(_)),
            Self::Structured => matches!(value, Value::Object(_) | Value::Array(_)),
        }
    }
}

/// A borrowed view of a set field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Text field value.
    Text(&'a str),
    /// Structured field value (object or array).
    Structured(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// The text value, if this is a text field.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(*text),
            Self::Structured(_) => None,
        }
    }

    /// The JSON value, if this is a structured field.
    #[must_use]
    pub const fn as_structured(&self) -> Option<&'a Value> {
        match self {
            Self::Structured(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// The kind of field this value came from.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Structured(_) => FieldKind::Structured,
        }
    }

    /// Convert back into an owned JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String((*text).to_string()),
            Self::Structured(value) => (*value).clone(),
        }
    }
}

/// A record populated from a raw JSON object through a closed field table.
///
/// Implementors list their fields once in [`FieldRecord::FIELDS`] and provide
/// one dispatch function to store values and one to read them back.
pub trait FieldRecord: Default {
    /// Declared upstream field names and their kinds.
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// Store `value` in the field named `name`.
    ///
    /// Called by [`map_record`] only for declared names, with values the
    /// field's [`FieldKind`] accepts.
    fn assign(&mut self, name: &str, value: &Value);

    /// Read the field named `name`, `None` when unset or undeclared.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// The kind of a declared field.
    #[must_use]
    fn kind_of(name: &str) -> Option<FieldKind> {
        Self::FIELDS
            .iter()
            .find(|(declared, _)| *declared == name)
            .map(|(_, kind)| *kind)
    }

    /// Returns `true` if the field is declared and set.
    #[must_use]
    fn is_set(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Set fields as a JSON object, keyed by their upstream names.
    #[must_use]
    fn to_map(&self) -> RawPayload {
        Self::FIELDS
            .iter()
            .filter_map(|(name, _)| {
                self.field(name)
                    .map(|value| ((*name).to_string(), value.to_json()))
            })
            .collect()
    }
}

/// Build a record from a raw JSON object.
///
/// Never fails: unknown keys are ignored, incompatible or `null` values leave
/// the field unset.
#[must_use]
pub fn map_record<R: FieldRecord>(raw: &RawPayload) -> R {
    let mut record = R::default();
    for (name, value) in raw {
        if R::kind_of(name).is_some_and(|kind| kind.accepts(value)) {
            record.assign(name, value);
        }
    }
    record
}

/// Build a record from a JSON value, `None` unless it is an object.
#[must_use]
pub fn map_value<R: FieldRecord>(value: &Value) -> Option<R> {
    value.as_object().map(map_record)
}

/// Text form of a scalar: strings as-is, numbers in decimal.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Objects and arrays, cloned.
pub(crate) fn structured(value: &Value) -> Option<Value> {
    FieldKind::Structured
        .accepts(value)
        .then(|| value.clone())
}

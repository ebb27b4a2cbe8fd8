//! Body serialization utilities.

use bytes::Bytes;

use crate::{Error, Result};

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use axerve_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Refund { amount: String }
///
/// let refund = Refund { amount: "1.00".to_string() };
/// let bytes = to_json(&refund).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"amount":"1.00"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize a response body with path-aware error messages.
///
/// Uses `serde_path_to_error` so a failure names the exact field that did not
/// decode (e.g. `payload.events[2]`). Every failure is reported as
/// [`Error::MalformedResponse`] carrying `status`.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for `T`.
///
/// # Example
///
/// ```
/// use axerve_core::{RawPayload, from_json};
///
/// let body: RawPayload = from_json(200, br#"{"payload":{"paymentID":"1"}}"#).expect("object");
/// assert!(body.contains_key("payload"));
///
/// let err = from_json::<RawPayload>(200, b"[1, 2]").unwrap_err();
/// assert!(err.is_malformed());
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| Error::malformed(status, e.path().to_string(), e.inner().to_string()))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::RawPayload;

    #[test]
    fn to_json_works() {
        #[derive(serde::Serialize)]
        struct Data {
            value: i32,
        }

        let bytes = to_json(&Data { value: 42 }).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"value":42}"#);
    }

    #[test]
    fn from_json_object() {
        let body: RawPayload = from_json(200, br#"{"error":{"code":"0"}}"#).expect("object");
        check!(body.len() == 1);
    }

    #[test]
    fn from_json_rejects_invalid_json() {
        let result = from_json::<RawPayload>(502, b"<html>");
        let_assert!(Err(Error::MalformedResponse { status, .. }) = result);
        check!(status == 502);
    }

    #[test]
    fn from_json_rejects_non_objects() {
        for bytes in [&b"[]"[..], b"\"text\"", b"null", b""] {
            let result = from_json::<RawPayload>(200, bytes);
            check!(result.is_err());
        }
    }

    #[test]
    fn from_json_reports_path() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Outer {
            payload: Inner,
        }

        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Inner {
            amount: u32,
        }

        let result = from_json::<Outer>(200, br#"{"payload":{"amount":"ten"}}"#);
        let_assert!(Err(Error::MalformedResponse { path, .. }) = result);
        check!(path == "payload.amount");
    }
}

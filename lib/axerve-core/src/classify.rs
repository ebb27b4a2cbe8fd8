//! HTTP status classification.

use serde_json::Value;

use crate::RawPayload;
use crate::error::{ClassifiedError, ErrorKind, UNKNOWN_ERROR_MESSAGE};
use crate::field;

/// Prefix of server error messages.
pub const SERVER_ERROR_PREFIX: &str = "Axerve server error: ";

/// Prefix of generic API error messages.
pub const API_ERROR_PREFIX: &str = "Axerve API error: ";

/// Classify an HTTP status and its decoded body.
///
/// Returns `None` below 400: the body can be turned into a
/// [`crate::ResponseEnvelope`]. From 400 up the exchange has failed and the
/// body must not be read as a success.
///
/// | Status | Kind | Message |
/// |--------|------|---------|
/// | 401, 403 | [`ErrorKind::Authentication`] | `error.description` |
/// | 400, 422 | [`ErrorKind::Validation`] | `error.description`, with `error` as validation errors |
/// | 5xx | [`ErrorKind::Server`] | prefixed `error.description` |
/// | other 4xx | [`ErrorKind::Generic`] | prefixed `error.description` |
///
/// A missing description falls back to [`UNKNOWN_ERROR_MESSAGE`].
#[must_use]
pub fn classify(status: u16, body: &RawPayload) -> Option<ClassifiedError> {
    if status < 400 {
        return None;
    }

    let error = body.get("error").and_then(Value::as_object);
    let description = error
        .and_then(|error| error.get("description"))
        .and_then(field::text)
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

    let classified = match status {
        401 | 403 => ClassifiedError::new(ErrorKind::Authentication, status, description, None),
        400 | 422 => ClassifiedError::new(
            ErrorKind::Validation,
            status,
            description,
            Some(error.cloned().unwrap_or_default()),
        ),
        500.. => ClassifiedError::new(
            ErrorKind::Server,
            status,
            format!("{SERVER_ERROR_PREFIX}{description}"),
            None,
        ),
        _ => ClassifiedError::new(
            ErrorKind::Generic,
            status,
            format!("{API_ERROR_PREFIX}{description}"),
            None,
        ),
    };

    Some(classified)
}

//! Endpoint templates carried through request extensions.

use derive_more::Display;

/// The unresolved endpoint path, such as `/payment/detail/{paymentID}`.
///
/// The gateway client attaches it to every request so logging can group calls
/// by endpoint without printing payment identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Wrap a template string.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// The template as written.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

//! HTTP methods used by the gateway.

use derive_more::Display;

/// The Axerve REST API only reads with GET and acts with POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// Lookups such as payment detail or shop methods.
    #[display("GET")]
    Get,
    /// Payment operations, always with a JSON body.
    #[display("POST")]
    Post,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}

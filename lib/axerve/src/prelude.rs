//! Prelude module for convenient imports.
//!
//! ```ignore
//! use axerve::prelude::*;
//! ```

pub use crate::{
    AxerveClient, ClientConfig, CreationPayload, DetailPayload, Environment, Error, ErrorKind,
    FieldRecord, GatewayConfig, HttpClient, HyperClient, Payload, RawPayload, ResponseEnvelope,
    Result, VariantKind,
};

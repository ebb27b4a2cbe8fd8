//! Prelude module for convenient imports.
//!
//! ```ignore
//! use axerve_core::prelude::*;
//! ```

pub use crate::{
    ClassifiedError, CreationPayload, DetailPayload, Error, ErrorKind, FieldRecord, HttpClient,
    Method, Payload, RawPayload, Request, Response, ResponseEnvelope, Result, VariantKind,
    classify, map_record,
};

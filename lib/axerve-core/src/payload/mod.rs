//! Typed payload shapes.
//!
//! The gateway answers with one of two payload shapes, selected by the caller
//! through [`VariantKind`]:
//!
//! - [`CreationPayload`] for `payment/create`
//! - [`DetailPayload`] for every call that describes a transaction

mod creation;
mod detail;

use derive_more::Display;

pub use creation::{CreationPayload, UserRedirect};
pub use detail::{CardData, DetailPayload, PaymentEvent, SUCCESSFUL_RESULTS};

use crate::RawPayload;
use crate::field::{FieldRecord, FieldValue, map_record};

/// Which payload shape a response is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum VariantKind {
    /// Payment creation response.
    #[display("creation")]
    Creation,
    /// Transaction detail response.
    #[display("detail")]
    Detail,
}

/// A payload of either shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Payment creation payload.
    Creation(CreationPayload),
    /// Transaction detail payload, boxed since it is much larger than a creation.
    Detail(Box<DetailPayload>),
}

impl Payload {
    /// Build the payload of the requested shape from a raw object.
    #[must_use]
    pub fn from_raw(kind: VariantKind, raw: &RawPayload) -> Self {
        match kind {
            VariantKind::Creation => Self::Creation(map_record(raw)),
            VariantKind::Detail => Self::Detail(Box::new(map_record(raw))),
        }
    }

    /// The shape of this payload.
    #[must_use]
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::Creation(_) => VariantKind::Creation,
            Self::Detail(_) => VariantKind::Detail,
        }
    }

    /// Read a declared field by its upstream name.
    ///
    /// Only names declared by the held shape resolve; anything else is `None`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self {
            Self::Creation(payload) => payload.field(name),
            Self::Detail(payload) => payload.field(name),
        }
    }

    /// Returns `true` if the field is declared by the held shape and set.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Set fields as a JSON object.
    #[must_use]
    pub fn to_map(&self) -> RawPayload {
        match self {
            Self::Creation(payload) => payload.to_map(),
            Self::Detail(payload) => payload.to_map(),
        }
    }

    /// `paymentID`, declared by both shapes.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        match self {
            Self::Creation(payload) => payload.payment_id(),
            Self::Detail(payload) => payload.payment_id(),
        }
    }

    /// Creation has no success signal of its own; detail checks `transactionResult`.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        match self {
            Self::Creation(_) => true,
            Self::Detail(payload) => payload.is_successful(),
        }
    }

    /// The creation payload, if that is the held shape.
    #[must_use]
    pub const fn as_creation(&self) -> Option<&CreationPayload> {
        match self {
            Self::Creation(payload) => Some(payload),
            Self::Detail(_) => None,
        }
    }

    /// The detail payload, if that is the held shape.
    #[must_use]
    pub fn as_detail(&self) -> Option<&DetailPayload> {
        match self {
            Self::Detail(payload) => Some(payload.as_ref()),
            Self::Creation(_) => None,
        }
    }
}

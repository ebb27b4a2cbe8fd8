//! `/check` endpoints.

use axerve_core::{ResponseEnvelope, VariantKind};
use serde::Serialize;

use crate::gateway::{AxerveClient, Endpoint};
use crate::{HttpClient, Result};

/// Card check endpoints of an [`AxerveClient`].
#[derive(Debug)]
pub struct Check<'a, C> {
    client: &'a AxerveClient<C>,
}

impl<'a, C> Check<'a, C> {
    pub(crate) const fn new(client: &'a AxerveClient<C>) -> Self {
        Self { client }
    }
}

impl<C: HttpClient> Check<'_, C> {
    /// Verify a credit card (`POST /check/creditCard`).
    pub async fn credit_card<T>(&self, data: &T) -> Result<ResponseEnvelope>
    where
        T: Serialize + ?Sized,
    {
        let body = self.client.request_body(data)?;
        let endpoint = Endpoint::new("/check/creditCard");
        self.client.post(endpoint, body, VariantKind::Detail).await
    }
}

//! `/shop` endpoints.

use axerve_core::RawPayload;

use crate::gateway::{AxerveClient, Endpoint};
use crate::{HttpClient, Result};

/// Shop endpoints of an [`AxerveClient`].
#[derive(Debug)]
pub struct Shop<'a, C> {
    client: &'a AxerveClient<C>,
}

impl<'a, C> Shop<'a, C> {
    pub(crate) const fn new(client: &'a AxerveClient<C>) -> Self {
        Self { client }
    }
}

impl<C: HttpClient> Shop<'_, C> {
    /// Payment methods enabled for a shop (`GET /shop/methods/{shopLogin}`).
    pub async fn methods(&self, shop_login: &str) -> Result<RawPayload> {
        let endpoint = Endpoint::new("/shop/methods/{shopLogin}").param("shopLogin", shop_login);
        self.client.get_raw(endpoint).await
    }
}

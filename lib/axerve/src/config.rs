//! Client configuration types.

use std::fmt;
use std::time::Duration;

use derive_more::Display;

use crate::{Error, Result};

/// Default gateway API version.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default `User-Agent` header value.
pub const USER_AGENT: &str = concat!("axerve-rs/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

// ============================================================================
// Gateway Configuration
// ============================================================================

/// Axerve deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Environment {
    /// Live payments.
    #[default]
    #[display("production")]
    Production,
    /// Test payments.
    #[display("sandbox")]
    Sandbox,
}

impl Environment {
    /// Base URL of the environment, without the API version.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://ecomms2s.sella.it/api",
            Self::Sandbox => "https://sandbox.gestpay.net/api",
        }
    }
}

/// Credentials and endpoint settings of an [`AxerveClient`](crate::AxerveClient).
///
/// # Example
///
/// ```
/// use axerve::{Environment, GatewayConfig};
///
/// let config = GatewayConfig::builder()
///     .api_key("my-api-key")
///     .shop_login("GESPAY12345")
///     .environment(Environment::Sandbox)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.base_url(), "https://sandbox.gestpay.net/api");
/// assert_eq!(config.api_version(), "v1");
/// ```
#[derive(Clone)]
pub struct GatewayConfig {
    api_key: String,
    shop_login: String,
    environment: Environment,
    api_version: String,
    user_agent: String,
    base_url: String,
    client: ClientConfig,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("shop_login", &self.shop_login)
            .field("environment", &self.environment)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url)
            .field("client", &self.client)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// API key sent in the `Authorization` header.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Merchant shop login.
    #[must_use]
    pub fn shop_login(&self) -> &str {
        &self.shop_login
    }

    /// Target environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// API version path segment.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Base URL, without the API version and without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// HTTP client settings.
    #[must_use]
    pub const fn client(&self) -> &ClientConfig {
        &self.client
    }
}

/// Builder for [`GatewayConfig`].
#[derive(Debug, Clone, Default)]
pub struct GatewayConfigBuilder {
    api_key: Option<String>,
    shop_login: Option<String>,
    environment: Environment,
    api_version: Option<String>,
    user_agent: Option<String>,
    base_url: Option<String>,
    client: Option<ClientConfig>,
}

impl GatewayConfigBuilder {
    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the shop login.
    #[must_use]
    pub fn shop_login(mut self, shop_login: impl Into<String>) -> Self {
        self.shop_login = Some(shop_login.into());
        self
    }

    /// Set the environment ([`Environment::Production`] by default).
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the environment base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP client settings.
    #[must_use]
    pub fn client(mut self, client: ClientConfig) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the API key or the shop login is
    /// missing or empty, and [`Error::InvalidUrl`] if the base URL override
    /// does not parse.
    pub fn build(self) -> Result<GatewayConfig> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::invalid_config("API key is required"))?;
        let shop_login = self
            .shop_login
            .filter(|login| !login.is_empty())
            .ok_or_else(|| Error::invalid_config("shop login is required"))?;

        let base_url = match self.base_url {
            Some(base_url) => {
                url::Url::parse(&base_url)?;
                base_url.trim_end_matches('/').to_string()
            }
            None => self.environment.base_url().to_string(),
        };

        Ok(GatewayConfig {
            api_key,
            shop_login,
            environment: self.environment,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
            base_url,
            client: self.client.unwrap_or_default(),
        })
    }
}

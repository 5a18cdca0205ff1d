//! Client configuration options.

use std::time::Duration;

use secrecy::SecretString;

use crate::{Environment, Error, Result};

/// Application credentials for the client-credentials grant.
///
/// # Example
///
/// ```
/// use dwolla_rs::{Credentials, Environment};
///
/// let credentials = Credentials::new("client-id", "client-secret", Environment::Sandbox);
/// assert_eq!(credentials.environment(), Environment::Sandbox);
/// ```
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
    environment: Environment,
}

impl Credentials {
    /// Create credentials for `environment`.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            environment,
        }
    }

    /// Read credentials from `DWOLLA_CLIENT_ID`, `DWOLLA_CLIENT_SECRET` and
    /// `DWOLLA_ENVIRONMENT` (defaults to sandbox).
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("DWOLLA_CLIENT_ID")
            .map_err(|_| Error::Config("DWOLLA_CLIENT_ID is not set".to_string()))?;
        let client_secret = std::env::var("DWOLLA_CLIENT_SECRET")
            .map_err(|_| Error::Config("DWOLLA_CLIENT_SECRET is not set".to_string()))?;
        let environment = match std::env::var("DWOLLA_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };
        Ok(Self::new(client_id, client_secret, environment))
    }

    /// The application's client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The application's client secret.
    pub fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }

    /// The environment these credentials belong to.
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Configuration for the Dwolla client.
///
/// # Example
///
/// ```
/// use dwolla_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Buffer time (in seconds) before token expiry to refresh
    pub refresh_buffer_secs: i64,
    /// API root to use instead of the environment's
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("dwolla-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            refresh_buffer_secs: 60,
            base_url: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the buffer time before token expiry to refresh.
    pub fn with_refresh_buffer(mut self, secs: i64) -> Self {
        self.refresh_buffer_secs = secs;
        self
    }

    /// Talk to `base_url` instead of the environment's API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The API root for `environment`, honoring any override.
    pub(crate) fn api_root(&self, environment: Environment) -> Result<url::Url> {
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| environment.api_base_url());
        let root = url::Url::parse(raw.trim_end_matches('/'))?;
        if root.cannot_be_a_base() {
            return Err(Error::Config(format!("`{raw}` cannot be used as an API root")));
        }
        Ok(root)
    }
}

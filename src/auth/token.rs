//! Client-credentials token lifecycle.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::client::Credentials;
use crate::error::ApiErrorBody;
use crate::{Error, Result};

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Obtains and caches the bearer token used on every authenticated request.
///
/// The token is fetched lazily on the first call to
/// [`access_token`](Self::access_token) and replaced once it comes within
/// the refresh buffer of its expiry, or after [`invalidate`](Self::invalidate).
///
/// # Thread Safety
///
/// The held token sits behind a `tokio::sync::RwLock`. Readers share the
/// lock while the token is fresh; a refresh takes the write lock and checks
/// freshness again, so callers that raced on a stale token wait for one
/// refresh instead of each issuing their own.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    basic_auth: SecretString,
    refresh_buffer: Duration,
    state: RwLock<Option<Token>>,
}

struct Token {
    value: SecretString,
    obtained_at: DateTime<Utc>,
    ttl: Duration,
}

impl Token {
    fn expires_at(&self) -> DateTime<Utc> {
        self.obtained_at + self.ttl
    }

    fn is_fresh(&self, buffer: Duration) -> bool {
        Utc::now() + buffer < self.expires_at()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenManager {
    /// Create a manager that requests tokens from `token_url`.
    ///
    /// The Basic authorization value is encoded here, once, and kept as a
    /// secret for the life of the manager.
    pub fn new(
        http: reqwest::Client,
        token_url: impl Into<String>,
        credentials: &Credentials,
        refresh_buffer_secs: i64,
    ) -> Self {
        let pair = format!(
            "{}:{}",
            credentials.client_id(),
            credentials.client_secret().expose_secret()
        );
        let basic_auth = SecretString::from(format!("Basic {}", STANDARD.encode(pair)));

        Self {
            http,
            token_url: token_url.into(),
            basic_auth,
            refresh_buffer: Duration::seconds(refresh_buffer_secs.max(0)),
            state: RwLock::new(None),
        }
    }

    /// Return a bearer token that is not about to expire, refreshing if needed.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthTransport`] if the token endpoint is unreachable
    /// - [`Error::AuthRejected`] if it answers with anything but 200
    /// - [`Error::AuthDecode`] if the payload is not a token response
    ///
    /// On failure the previously held token, if any, is left in place and
    /// nothing about the failure is cached.
    pub async fn access_token(&self) -> Result<SecretString> {
        {
            let held = self.state.read().await;
            if let Some(token) = held.as_ref().filter(|t| t.is_fresh(self.refresh_buffer)) {
                return Ok(token.value.clone());
            }
        }

        let mut held = self.state.write().await;
        // Another task may have refreshed while we waited for the write lock.
        if let Some(token) = held.as_ref().filter(|t| t.is_fresh(self.refresh_buffer)) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *held = Some(token);
        Ok(value)
    }

    /// Drop the held token so the next call fetches a new one.
    ///
    /// Use this after an operation fails with [`Error::InvalidToken`].
    pub async fn invalidate(&self) {
        let mut held = self.state.write().await;
        if held.take().is_some() {
            debug!("access token invalidated");
        }
    }

    /// When the held token expires, if one is held.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.as_ref().map(Token::expires_at)
    }

    async fn request_token(&self) -> Result<Token> {
        debug!(url = %self.token_url, "requesting access token");

        let response = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, self.basic_auth.expose_secret())
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(Error::AuthTransport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(Error::AuthTransport)?;

        if status != reqwest::StatusCode::OK {
            warn!(status = status.as_u16(), "token request rejected");
            return Err(Error::AuthRejected {
                status: status.as_u16(),
                body: ApiErrorBody::parse(&bytes),
            });
        }

        let decoded: TokenResponse = serde_json::from_slice(&bytes).map_err(Error::AuthDecode)?;
        let ttl = Duration::seconds(decoded.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS).max(0));

        debug!(
            token_type = decoded.token_type.as_deref().unwrap_or("bearer"),
            expires_in = ttl.num_seconds(),
            "access token refreshed"
        );

        Ok(Token {
            value: SecretString::from(decoded.access_token),
            obtained_at: Utc::now(),
            ttl,
        })
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.token_url)
            .field("basic_auth", &"[REDACTED]")
            .field("refresh_buffer", &self.refresh_buffer)
            .finish()
    }
}

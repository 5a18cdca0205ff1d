//! HTTP client implementation for the Dwolla API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, LOCATION};
use reqwest::{Method, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{
    AccountsService, CustomersService, DocumentsService, FundingSourcesService,
    MassPaymentsService, TransfersService,
};
use crate::auth::TokenManager;
use crate::error::ApiErrorBody;
use crate::models::{HalCollection, LinkMap, Linked, Resource, ResourceKind};
use crate::{Environment, Error, Result};

use super::config::{ClientConfig, Credentials};

/// Media type of every request and response body.
pub const HAL_JSON: &str = "application/vnd.dwolla.v1.hal+json";

/// Header that makes a create request safe to repeat.
pub const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

/// The main client for interacting with the Dwolla API.
///
/// Construction exchanges the credentials for a token and fetches the root
/// document, whose links are the entry points for every service. After
/// that, services only follow links found in the root or in resources they
/// have already fetched.
///
/// # Example
///
/// ```no_run
/// use dwolla_rs::{Credentials, DwollaClient, Environment};
///
/// # async fn example() -> dwolla_rs::Result<()> {
/// let client = DwollaClient::connect(Credentials::new(
///     "your-client-id",
///     "your-client-secret",
///     Environment::Sandbox,
/// ))
/// .await?;
///
/// let account = client.accounts().retrieve().await?;
/// let sources = client.accounts().funding_sources(&account).await?;
/// println!("{} has {} funding sources", account.name, sources.len());
/// # Ok(())
/// # }
/// ```
pub struct DwollaClient {
    pub(crate) inner: Arc<ClientInner>,
}

/// Shared state behind every service: transport, token, and root links.
pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) tokens: TokenManager,
    pub(crate) root: LinkMap,
    pub(crate) config: ClientConfig,
    pub(crate) environment: Environment,
}

/// Body of an outgoing request.
pub(crate) enum RequestBody {
    Empty,
    Json(Vec<u8>),
    Multipart(reqwest::multipart::Form),
}

impl RequestBody {
    /// Encode `body` as JSON.
    pub(crate) fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        serde_json::to_vec(body)
            .map(RequestBody::Json)
            .map_err(Error::Encode)
    }
}

impl DwollaClient {
    /// Connect with default configuration.
    ///
    /// # Errors
    ///
    /// Fails if the token cannot be obtained or the root document cannot be
    /// fetched; a client is never returned without its root links.
    pub async fn connect(credentials: Credentials) -> Result<Self> {
        Self::connect_with_config(credentials, ClientConfig::default()).await
    }

    /// Connect with a custom configuration.
    pub async fn connect_with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let environment = credentials.environment();
        let root_url = config.api_root(environment)?;
        let token_url = format!("{}/token", root_url.as_str().trim_end_matches('/'));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let tokens = TokenManager::new(
            http.clone(),
            token_url,
            &credentials,
            config.refresh_buffer_secs,
        );

        let mut inner = ClientInner {
            http,
            tokens,
            root: LinkMap::new(),
            config,
            environment,
        };

        let discovered: Linked = inner.get(root_url.as_str(), ResourceKind::Root).await?;
        debug!(
            relations = discovered.links.len(),
            environment = %environment,
            "discovered API root"
        );
        inner.root = discovered.links;

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the customers service.
    pub fn customers(&self) -> CustomersService {
        CustomersService::new(self.inner.clone())
    }

    /// Get the documents service.
    pub fn documents(&self) -> DocumentsService {
        DocumentsService::new(self.inner.clone())
    }

    /// Get the funding sources service.
    pub fn funding_sources(&self) -> FundingSourcesService {
        FundingSourcesService::new(self.inner.clone())
    }

    /// Get the transfers service.
    pub fn transfers(&self) -> TransfersService {
        TransfersService::new(self.inner.clone())
    }

    /// Get the mass payments service.
    pub fn mass_payments(&self) -> MassPaymentsService {
        MassPaymentsService::new(self.inner.clone())
    }

    /// Links advertised by the API root.
    pub fn root_links(&self) -> &LinkMap {
        &self.inner.root
    }

    /// The environment this client talks to.
    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    /// The configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Drop the cached token so the next request fetches a new one.
    ///
    /// Call this after an [`Error::InvalidToken`] before retrying once.
    pub async fn invalidate_token(&self) {
        self.inner.tokens.invalidate().await;
    }

    /// Fetch any resource by URL.
    ///
    /// Useful for following a link the typed services do not cover, e.g. a
    /// transfer's `source` or a funding source's `customer`.
    pub async fn follow<T>(&self, href: &str) -> Result<T>
    where
        T: Resource + DeserializeOwned,
    {
        self.inner.get(href, T::KIND).await
    }
}

impl ClientInner {
    /// Resolve a relation advertised by the API root.
    pub(crate) fn root_relation(&self, relation: &str) -> Result<&str> {
        self.root.resolve(relation)
    }

    /// Issue an authenticated request.
    ///
    /// Every call to the API goes through here: the bearer token and the
    /// HAL media type are always attached.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: &str,
        body: RequestBody,
        extra_headers: HeaderMap,
    ) -> Result<Response> {
        let token = self.tokens.access_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(HAL_JSON));
        headers.extend(extra_headers);

        debug!(method = %method, url, "sending request");

        let request = self.http.request(method, url).headers(headers);
        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(bytes) => request
                .header(CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))
                .body(bytes),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        Ok(request.send().await?)
    }

    /// GET `url` and decode a 200 response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str, resource: ResourceKind) -> Result<T> {
        let response = self
            .send(Method::GET, url, RequestBody::Empty, HeaderMap::new())
            .await?;
        read_json(response, StatusCode::OK, resource).await
    }

    /// GET a collection page at `url` and take the items embedded under `relation`.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        url: &str,
        relation: &str,
        resource: ResourceKind,
    ) -> Result<Vec<T>> {
        let page: HalCollection<T> = self.get(url, resource).await?;
        Ok(page.into_items(relation))
    }

    /// POST a JSON body to `url`, expecting 201, and return the new resource's URL.
    pub(crate) async fn create<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        resource: ResourceKind,
        extra_headers: HeaderMap,
    ) -> Result<String> {
        let response = self
            .send(Method::POST, url, RequestBody::json(body)?, extra_headers)
            .await?;
        read_created(response, resource).await
    }

    /// POST a JSON body to `url`, expecting 200 and the updated resource.
    pub(crate) async fn update<T, B>(&self, url: &str, body: &B, resource: ResourceKind) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .send(Method::POST, url, RequestBody::json(body)?, HeaderMap::new())
            .await?;
        read_json(response, StatusCode::OK, resource).await
    }
}

/// Build the extra headers for an optional idempotency key.
pub(crate) fn idempotency_headers(key: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(key) = key {
        let value = HeaderValue::from_str(key)
            .map_err(|_| Error::InvalidInput(format!("invalid idempotency key `{key}`")))?;
        headers.insert(IDEMPOTENCY_KEY, value);
    }
    Ok(headers)
}

/// Decode the body of a response that must carry `expected`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
    resource: ResourceKind,
) -> Result<T> {
    let response = expect_status(response, expected, resource).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Decode { resource, source })
}

/// Take the `Location` header of a 201 response.
pub(crate) async fn read_created(response: Response, resource: ResourceKind) -> Result<String> {
    let response = expect_status(response, StatusCode::CREATED, resource).await?;
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or(Error::MissingLocation { resource })
}

/// Pass the response through if it carries `expected`, otherwise turn it into an error.
pub(crate) async fn expect_status(
    response: Response,
    expected: StatusCode,
    resource: ResourceKind,
) -> Result<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    Err(reject(response, expected, resource).await)
}

/// Turn a response with an unwanted status into the matching error.
pub(crate) async fn reject(response: Response, expected: StatusCode, resource: ResourceKind) -> Error {
    let status = response.status();

    if status.is_success() {
        warn!(
            status = status.as_u16(),
            expected = expected.as_u16(),
            resource = %resource,
            "unexpected success status"
        );
        return Error::UnexpectedStatus {
            status: status.as_u16(),
            expected: expected.as_u16(),
            resource,
        };
    }

    let body = match response.bytes().await {
        Ok(bytes) => ApiErrorBody::parse(&bytes),
        Err(_) => None,
    };
    debug!(status = status.as_u16(), resource = %resource, "request failed");
    Error::from_status(status, resource, body)
}

impl Clone for DwollaClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for DwollaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DwollaClient")
            .field("environment", &self.inner.environment)
            .field("config", &self.inner.config)
            .field("root_relations", &self.inner.root.len())
            .finish()
    }
}

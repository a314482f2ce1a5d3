use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{DEFAULT_CACHE_CAPACITY, TtlCache};
use crate::rate_limit::RateLimiter;
use crate::types::ApiError;

/// Default base URL of the Smoobu API
pub const DEFAULT_BASE_URL: &str = "https://login.smoobu.com/api";

/// Raw JSON access to a REST API
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// GET `endpoint` (relative to the base URL, query string included)
    async fn get(&self, endpoint: &str) -> Result<Value, ApiError>;

    /// POST a JSON body to `endpoint`
    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError>;
}

/// Settings for [`SmoobuApiClient`]
#[derive(Debug, Clone)]
pub struct SmoobuClientConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// API key sent in the `Api-Key` header
    pub api_key: String,
    /// How long GET responses are served from the cache (default: 5 minutes)
    pub cache_ttl: Duration,
    /// Maximum requests per second (default: 5)
    pub rate_limit: u32,
    /// Per-request timeout (default: 30 seconds)
    pub timeout: Duration,
}

impl SmoobuClientConfig {
    /// Configuration with default limits for the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            cache_ttl: Duration::from_secs(300),
            rate_limit: 5,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the Smoobu REST API with response caching and rate limiting
pub struct SmoobuApiClient {
    client: Client,
    base_url: String,
    cache: Mutex<TtlCache<Value>>,
    limiter: RateLimiter,
}

impl SmoobuApiClient {
    /// Create a new Smoobu API client
    pub fn new(config: SmoobuClientConfig) -> Result<Self, ApiError> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ApiError::Api(format!("Invalid API key header: {}", e)))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("api-key"), api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: Mutex::new(TtlCache::new(DEFAULT_CACHE_CAPACITY, config.cache_ttl)),
            limiter: RateLimiter::per_second(config.rate_limit),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Turn a response into JSON, mapping unsuccessful statuses to [`ApiError`]
    async fn read_json(response: Response) -> Result<Value, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            warn!("API request failed with status {}: {}", status, body);
            return Err(error_for_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::DataFormat(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ApiClient for SmoobuApiClient {
    async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        if let Some(cached) = self.cache.lock().await.get(endpoint) {
            debug!("Cache hit for {}", endpoint);
            return Ok(cached);
        }

        self.limiter.acquire().await;

        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("HTTP request failed: {}", e)))?;

        let data = Self::read_json(response).await?;
        self.cache.lock().await.insert(endpoint, data.clone());

        Ok(data)
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        self.limiter.acquire().await;

        let url = self.url(endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("HTTP request failed: {}", e)))?;

        Self::read_json(response).await
    }
}

/// Map an unsuccessful HTTP status to the matching [`ApiError`]
pub fn error_for_status(status: StatusCode, body: &str) -> ApiError {
    match status.as_u16() {
        429 => ApiError::RateLimited,
        401 | 403 => ApiError::AuthenticationFailed,
        _ if body.is_empty() => ApiError::Api(format!("HTTP {}", status)),
        _ => ApiError::Api(format!("HTTP {} - {}", status, body)),
    }
}

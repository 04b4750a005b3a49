//! HTTP client for the remote Firecrawl service
//!
//! Every operation sends exactly one request and never retries. Non-success
//! responses become `ExplorerError::RemoteService` carrying the status code
//! and the raw body.

use crate::api::types::{
    ContentResult, CrawlInitiated, CrawlOptions, CrawlRequest, CrawlStatus, LinkSet, MapOptions,
    MapRequest, ScrapeOptions, ScrapeRequest,
};
use crate::config::ApiConfig;
use crate::{ExplorerError, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Header carrying the idempotency key on write requests
pub const IDEMPOTENCY_HEADER: &str = "x-idempotency-key";

/// Builds the underlying HTTP client
///
/// # Arguments
///
/// * `timeout_secs` - Overall per-request timeout
pub fn build_http_client(timeout_secs: u64) -> std::result::Result<Client, reqwest::Error> {
    let user_agent = format!("firecrawl-explorer/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Derives an idempotency key from a request body
///
/// Identical bodies produce identical keys, so resubmitting the same request
/// lets the service recognise the duplicate.
pub fn idempotency_key_for<T: Serialize>(body: &T) -> Result<String> {
    let bytes = serde_json::to_vec(body).map_err(|e| ExplorerError::InvalidInput(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Client for the Firecrawl v1 API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeEnvelope {
    #[serde(default)]
    data: ContentResult,
}

impl ApiClient {
    /// Creates a client from connection settings
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = build_http_client(config.timeout_secs).map_err(|source| ExplorerError::Http {
            url: config.base_url.clone(),
            source,
        })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.credential().map(str::to_string),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Scrapes a single page, returning the unwrapped `data` envelope
    pub async fn scrape(&self, url: &str, options: ScrapeOptions) -> Result<ContentResult> {
        let body = ScrapeRequest {
            url: url.to_string(),
            options,
        };
        let envelope: ScrapeEnvelope = self.post("/v1/scrape", &body, None).await?;
        Ok(envelope.data)
    }

    /// Starts an asynchronous crawl job
    ///
    /// The request carries an idempotency key derived from its body.
    pub async fn initiate_crawl(&self, url: &str, options: CrawlOptions) -> Result<CrawlInitiated> {
        let body = CrawlRequest {
            url: url.to_string(),
            options,
        };
        let key = idempotency_key_for(&body)?;
        self.post("/v1/crawl", &body, Some(&key)).await
    }

    /// Reads the current state of a crawl job
    pub async fn get_crawl_status(&self, job_id: &str) -> Result<CrawlStatus> {
        let endpoint = format!("/v1/crawl/{}", job_id);
        let request = self.request(Method::GET, &endpoint, None);
        self.send(&endpoint, request).await
    }

    /// Discovers the links of a site
    pub async fn map_links(&self, url: &str, options: MapOptions) -> Result<LinkSet> {
        let body = MapRequest {
            url: url.to_string(),
            options,
        };
        self.post("/v1/map", &body, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> Result<T> {
        let request = self
            .request(Method::POST, endpoint, idempotency_key)
            .json(body);
        self.send(endpoint, request).await
    }

    fn request(&self, method: Method, endpoint: &str, idempotency_key: Option<&str>) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, endpoint));

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }

        request
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("Sending request to {}", url);

        let response = request.send().await.map_err(|source| ExplorerError::Http {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ExplorerError::Http {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            tracing::debug!("{} returned HTTP {}", url, status.as_u16());
            return Err(ExplorerError::RemoteService {
                status_code: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ExplorerError::InvalidResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

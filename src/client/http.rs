//! HTTP client for the directory sync API

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::DirectoryApi;
use super::models::{CreateDirectoryRequest, Directory};
use crate::error::{ApiError, ConfigError, Error, Result};

/// Default API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.example.com/api/v1";

/// Requests per second allowed against the API
const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(6).unwrap();

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory sync API client
pub struct DirectorySyncClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl DirectorySyncClient {
    /// Create a client against the default API host
    #[cfg(test)]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_host(api_key, None)
    }

    /// Create a client against a custom API host (for development/testing)
    pub fn with_host(api_key: impl Into<String>, api_host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("dsyncctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        let base = api_host
            .map(|host| normalize_base_url(&host))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let base_url = Url::parse(&base)
            .map_err(|e| ConfigError::Invalid(format!("API host {}: {}", base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(
                ConfigError::Invalid(format!("API host {} is not an HTTP URL", base)).into(),
            );
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    /// The resolved API base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an authenticated request for the path `segments` under the base
    /// URL. Each segment is percent-encoded, so ids never change the route.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        org_id: Option<i64>,
    ) -> Result<RequestBuilder> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::Invalid(format!("API host {} is not an HTTP URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        debug!("{} {} (orgId={:?})", method, url, org_id);

        let mut builder = self.http.request(method, url).bearer_auth(&self.api_key);
        if let Some(org) = org_id {
            builder = builder.query(&[("orgId", org)]);
        }
        Ok(builder)
    }

    /// Send a request after waiting on the rate limiter, mapping error statuses
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        self.rate_limiter.until_ready().await;

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => {
                ApiError::NotFound(error_message(response, "Resource not found").await)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                ApiError::RateLimit(Duration::from_secs(retry_after))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(error_message(response, "Bad request").await)
            }
            status if status.is_server_error() => {
                let fallback = format!("Server error: {}", status);
                ApiError::ServerError(error_message(response, &fallback).await)
            }
            status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        }
        .into())
    }

    /// Send and decode a JSON body
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }
}

/// Accept hosts with or without the `/api/v1` suffix and trailing slash
fn normalize_base_url(host: &str) -> String {
    let trimmed = host.trim_end_matches('/');
    if trimmed.ends_with("/api/v1") {
        trimmed.to_string()
    } else {
        format!("{}/api/v1", trimmed)
    }
}

/// Extract a human-readable message from an error response.
///
/// Bodies shaped `{"message": "..."}` are unwrapped; other bodies are used
/// verbatim; empty bodies fall back to `fallback`.
async fn error_message(response: Response, fallback: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let text = response.text().await.unwrap_or_default();
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text)
        && !body.message.is_empty()
    {
        return body.message;
    }
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

#[async_trait]
impl DirectoryApi for DirectorySyncClient {
    async fn list_directories(&self, org_id: Option<i64>) -> Result<Vec<Directory>> {
        let builder = self.request(Method::GET, &["dsync"], org_id)?;
        match self.send_json(builder).await {
            // A scope that was never provisioned reads the same as an empty one
            Err(Error::Api(ApiError::NotFound(msg))) => {
                debug!("Directory read returned not found ({}), treating as empty", msg);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn create_directory(&self, request: CreateDirectoryRequest) -> Result<Directory> {
        let builder = self.request(Method::POST, &["dsync"], None)?.json(&request);
        self.send_json(builder).await
    }

    async fn delete_directory(&self, org_id: Option<i64>, directory_id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &["dsync", directory_id], org_id)?;
        self.send(builder).await?;
        Ok(())
    }
}

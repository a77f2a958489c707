//! HTTP client wrapper for the movie metadata API
//!
//! Every request goes to a fixed base URL, carries the API key as the
//! `api_key` query parameter and passes its response through a single
//! [`ResponseInterceptor`] before the body is decoded.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ApiError, Result};

/// Inspects the status of every response before it is decoded
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, url: &str, status: StatusCode);
}

/// Default interceptor: logs unauthorized responses and does nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct UnauthorizedLogger;

impl ResponseInterceptor for UnauthorizedLogger {
    fn on_response(&self, url: &str, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            // No re-authentication flow exists; the caller gets the error as-is.
            tracing::warn!(url, "API rejected the request as unauthorized; check api.api_key");
        }
    }
}

/// Thin HTTP client bound to one API base URL and key
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    interceptor: Arc<dyn ResponseInterceptor>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `base_url` authenticated with `api_key`
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cinescope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(%base_url, "Creating API client");

        Ok(Self {
            client,
            base_url,
            api_key: SecretString::from(api_key.into()),
            interceptor: Arc::new(UnauthorizedLogger),
        })
    }

    /// Create a client from the `[api]` section; fails when no key is configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let key = config.api_key()?;
        Self::new(config.api.base_url.clone(), key)
    }

    /// Replace the response interceptor
    pub fn with_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptor = interceptor;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the base URL
    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with `params` plus the API key and decode the JSON body
    ///
    /// # Errors
    ///
    /// - `ApiError::Network` if the request cannot be sent or the body read
    /// - `ApiError::Unauthorized` on 401
    /// - `ApiError::Status` on any other non-success status
    /// - `ApiError::Decode` if the body is not the expected JSON
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, ?params, "GET");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("api_key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.without_url().to_string()))?;

        let status = response.status();
        self.interceptor.on_response(&url, status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized(url).into());
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.without_url().to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{}: {}", url, e)).into())
    }
}

//! REST client for the ML API.
//!
//! Wraps the dashboard's JSON endpoints using [`reqwest`]. Responses are
//! returned as raw [`serde_json::Value`]s; the views hand them to the
//! normalizers in `mlboard_core`.

use serde_json::Value;

use mlboard_core::CoreError;

use crate::batch::{Endpoint, Method};
use crate::config::ClientConfig;

/// Errors from the ML API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("ML API error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The payload was JSON but lacked a required field or had the wrong
    /// shape.
    #[error("Malformed response: {0}")]
    Malformed(#[from] CoreError),
}

/// HTTP client for one ML API deployment.
#[derive(Debug, Clone)]
pub struct MlApi {
    client: reqwest::Client,
    api_url: String,
}

impl MlApi {
    /// Build a client with the configured per-request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// Issue one request and return its JSON body.
    pub async fn send(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.api_url, endpoint.path);
        let request = match endpoint.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        let request = match &endpoint.body {
            Some(body) => request.json(body),
            None => request,
        };

        let response = request.send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an
    /// [`ApiError::Status`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }
}

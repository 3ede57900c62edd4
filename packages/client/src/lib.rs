#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! HTTP JSON client for the KAVACH crime intelligence backend.
//!
//! The backend is an external collaborator reachable at a configurable base
//! URL. Five endpoints are exposed; every non-2xx response is treated
//! uniformly as a failure with no status-specific handling and no retry.
//! Response bodies are read as text first and parsed second so that decode
//! failures can log the offending payload.

use async_trait::async_trait;
use kavach_intel_models::{
    FirRecord, Hotspot, PredictRequest, PredictResponse, PredictiveZone, SectionTally,
};
use serde::de::DeserializeOwned;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "KAVACH_API_URL";

/// Default backend address when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Errors from backend requests.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        /// The response status code.
        status: reqwest::StatusCode,
    },
}

/// The five backend operations, as a trait so that views and tests can run
/// against an in-memory fixture instead of live HTTP.
#[async_trait]
pub trait IntelBackend: Send + Sync {
    /// Fetches the geographic hotspot collection.
    async fn hotspots(&self) -> Result<Vec<Hotspot>, ClientError>;

    /// Fetches the forecast zone collection.
    async fn predictive_zones(&self) -> Result<Vec<PredictiveZone>, ClientError>;

    /// Fetches the FIR listing.
    async fn firs(&self) -> Result<Vec<FirRecord>, ClientError>;

    /// Fetches per-section case tallies.
    async fn bns_stats(&self) -> Result<Vec<SectionTally>, ClientError>;

    /// Requests a live risk prediction for a coordinate.
    async fn predict(&self, request: PredictRequest) -> Result<PredictResponse, ClientError>;
}

/// Client for the backend's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against the given base URL. A trailing slash is
    /// stripped so paths can be joined naively.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a client from the `KAVACH_API_URL` environment variable,
    /// falling back to the local loopback default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    /// Returns the configured base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Single-attempt GET returning parsed JSON.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Single-attempt POST with a JSON body, returning parsed JSON.
    async fn post_json<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let url = response.url().to_string();
        let status = response.status();

        if !status.is_success() {
            log::error!("{url}: HTTP {status}");
            return Err(ClientError::Status { status });
        }

        // Text first, JSON second, so the payload can be logged on failure.
        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(json_err) => {
                let preview = if text.len() > BODY_PREVIEW_LEN {
                    &text[..BODY_PREVIEW_LEN]
                } else {
                    text.as_str()
                };
                log::error!(
                    "{url}: JSON parse failed: {json_err} \
                     (received {} bytes, body preview: {preview})",
                    text.len(),
                );
                Err(ClientError::Json(json_err))
            }
        }
    }
}

#[async_trait]
impl IntelBackend for ApiClient {
    async fn hotspots(&self) -> Result<Vec<Hotspot>, ClientError> {
        self.get_json("/hotspots").await
    }

    async fn predictive_zones(&self) -> Result<Vec<PredictiveZone>, ClientError> {
        self.get_json("/predictive-zones").await
    }

    async fn firs(&self) -> Result<Vec<FirRecord>, ClientError> {
        self.get_json("/firs").await
    }

    async fn bns_stats(&self) -> Result<Vec<SectionTally>, ClientError> {
        self.get_json("/bns-stats").await
    }

    async fn predict(&self, request: PredictRequest) -> Result<PredictResponse, ClientError> {
        self.post_json("/predict", &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let client = ApiClient::new("http://10.0.0.4:9000///");
        assert_eq!(client.base_url(), "http://10.0.0.4:9000");
        assert_eq!(client.url("/hotspots"), "http://10.0.0.4:9000/hotspots");
    }

    #[test]
    fn default_base_url_is_loopback() {
        // SAFETY: tests in this module run single-threaded with respect to
        // this variable; nothing else reads it concurrently.
        unsafe {
            std::env::remove_var(API_URL_ENV);
        }
        let client = ApiClient::from_env();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn status_error_displays_code() {
        let err = ClientError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
    }
}

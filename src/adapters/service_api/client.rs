//! Shared HTTP plumbing for the interview backend.
//!
//! All four collaborators (questions, speech, transcription, CV extraction)
//! live behind one base URL. This client owns the connection pool, the
//! optional bearer token, and the mapping from transport failures to
//! [`ServiceError`].

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::ServiceError;

/// Default base URL of the interview backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the interview backend.
#[derive(Debug, Clone)]
pub struct ServiceApiConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Bearer token, if the backend requires one.
    api_key: Option<Secret<String>>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ServiceApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ServiceApiConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Sets the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Body shape shared by the transcription and extraction endpoints.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct TextPayload {
    pub text: String,
}

/// HTTP client for the interview backend.
#[derive(Debug, Clone)]
pub struct ServiceApiClient {
    config: ServiceApiConfig,
    client: Client,
}

impl ServiceApiClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// `ServiceError::Network` if the TLS backend cannot be initialized.
    pub fn new(config: ServiceApiConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServiceApiConfig {
        &self.config
    }

    /// Builds the full URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// POSTs a JSON body and decodes a JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        Self::decode_json(response).await
    }

    /// POSTs a JSON body and returns the raw reply bytes and content type.
    pub async fn post_json_for_bytes<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(Vec<u8>, Option<String>), ServiceError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        Ok((bytes.to_vec(), content_type))
    }

    /// POSTs one file as multipart field `file` and decodes a JSON reply.
    pub async fn post_file<T>(
        &self,
        path: &str,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
    {
        let mut part = Part::bytes(bytes).file_name(file_name.to_string());
        if let Some(mime) = content_type {
            part = part
                .mime_str(mime)
                .map_err(|e| ServiceError::network(format!("Invalid content type '{}': {}", mime, e)))?;
        }
        let form = Form::new().part("file", part);

        let response = self
            .send(self.client.post(self.url(path)).multipart(form))
            .await?;
        Self::decode_json(response).await
    }

    /// Attaches auth, sends, and rejects non-success statuses.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let request = match self.config.api_key() {
            Some(key) => request.bearer_auth(key),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "interview backend returned an error status");
        Err(ServiceError::status(status.as_u16(), body))
    }

    async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::network(format!("Failed to read response body: {}", e)))?;
        serde_json::from_slice(&body)
            .map_err(|e| ServiceError::parse(format!("Failed to parse response: {}", e)))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ServiceError::network(format!("Connection failed: {}", e))
        } else {
            ServiceError::network(e.to_string())
        }
    }
}

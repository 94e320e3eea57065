//! HTTP adapter for the processor's client API, built on reqwest.

use super::authorization::{Authorization, with_trailing_slash};
use crate::domain::configuration::Configuration;
use crate::domain::metadata::ClientMetadata;
use crate::domain::ports::ApiClient;
use crate::error::{ApiError, Result, TokenizationError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const CONFIGURATION_PATH: &str = "v1/configuration";
const CONFIGURATION_VERSION: &str = "3";

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub authorization: Authorization,
    /// Overrides the URL derived from `authorization`.
    pub base_url: Option<Url>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl HttpClientConfig {
    pub fn new(authorization: Authorization) -> Self {
        Self {
            authorization,
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// [`ApiClient`] talking JSON over HTTP to the gateway's client API.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: Url,
    authorization: Authorization,
    metadata: ClientMetadata,
}

impl HttpApiClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let base_url = match config.base_url {
            Some(url) => with_trailing_slash(url),
            None => config.authorization.base_url()?,
        };

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TokenizationError::Integration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            authorization: config.authorization,
            metadata: ClientMetadata::new(),
        })
    }

    /// Replaces source and integration; the session id stays the one generated for this client.
    pub fn with_metadata(mut self, metadata: ClientMetadata) -> Self {
        self.metadata.source = metadata.source;
        self.metadata.integration = metadata.integration;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport(format!("invalid request path `{path}`: {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.authorization {
            Authorization::TokenizationKey { key, .. } => request.header("Client-Key", key),
            Authorization::ClientToken {
                authorization_fingerprint,
                ..
            } => request.query(&[("authorization_fingerprint", authorization_fingerprint)]),
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    #[instrument(skip_all)]
    async fn fetch_configuration(&self) -> Result<Configuration, ApiError> {
        let url = self.endpoint(CONFIGURATION_PATH)?;
        debug!(%url, "fetching configuration");

        let request = self
            .http
            .get(url)
            .query(&[("configVersion", CONFIGURATION_VERSION)]);
        let response = self.authorize(request).send().await?;
        read_json(response).await.map(Configuration::new)
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, "posting");

        let response = self.authorize(self.http.post(url)).json(&body).send().await?;
        read_json(response).await
    }

    fn metadata(&self) -> &ClientMetadata {
        &self.metadata
    }
}

/// Decodes a JSON body, turning non-success statuses into [`ApiError::Status`].
async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let payload = serde_json::from_slice::<Value>(&bytes)
        .ok()
        .filter(|body| body.get("error").is_some());
    let message = payload
        .as_ref()
        .and_then(|body| body.pointer("/error/message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_owned());

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_authorization() {
        let auth = Authorization::parse("sandbox_abc_merchant").unwrap();
        let client = HttpApiClient::new(HttpClientConfig::new(auth)).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://api.sandbox.braintreegateway.com/merchants/merchant/client_api/"
        );
    }

    #[test]
    fn test_endpoint_joins_under_base_url() {
        let auth = Authorization::parse("development_abc_merchant").unwrap();
        let mut config = HttpClientConfig::new(auth);
        config.base_url = Some(Url::parse("http://127.0.0.1:8080/gateway").unwrap());
        let client = HttpApiClient::new(config).unwrap();

        assert_eq!(
            client
                .endpoint("v1/payment_methods/apple_payment_tokens")
                .unwrap()
                .as_str(),
            "http://127.0.0.1:8080/gateway/v1/payment_methods/apple_payment_tokens"
        );
        assert_eq!(
            client.endpoint("/v1/configuration").unwrap().as_str(),
            "http://127.0.0.1:8080/gateway/v1/configuration"
        );
    }

    #[test]
    fn test_session_id_survives_metadata_override() {
        let auth = Authorization::parse("development_abc_merchant").unwrap();
        let client = HttpApiClient::new(HttpClientConfig::new(auth)).unwrap();
        let session_id = client.metadata().session_id().to_owned();

        let client = client.with_metadata(
            ClientMetadata::with_session_id("other")
                .integration(crate::domain::metadata::Integration::DropIn),
        );
        assert_eq!(client.metadata().session_id(), session_id);
        assert_eq!(client.metadata().integration.as_str(), "dropin");
    }
}

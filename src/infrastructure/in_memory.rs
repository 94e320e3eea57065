use crate::domain::configuration::Configuration;
use crate::domain::metadata::ClientMetadata;
use crate::domain::ports::ApiClient;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A POST observed by [`InMemoryApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Default)]
struct Recorded {
    configuration_fetches: usize,
    requests: Vec<RecordedRequest>,
}

/// An API client that answers with canned documents and records what it was asked.
///
/// Clones share the recorded history, so a test can hand one clone to the
/// client under test and inspect the other afterwards.
#[derive(Debug, Clone)]
pub struct InMemoryApiClient {
    metadata: ClientMetadata,
    configuration: Result<Value, ApiError>,
    response: Result<Value, ApiError>,
    recorded: Arc<RwLock<Recorded>>,
}

impl InMemoryApiClient {
    /// Creates a client serving an empty configuration and an empty response.
    pub fn new() -> Self {
        Self {
            metadata: ClientMetadata::new(),
            configuration: Ok(Value::Object(Default::default())),
            response: Ok(Value::Null),
            recorded: Arc::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ClientMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_configuration(mut self, body: Value) -> Self {
        self.configuration = Ok(body);
        self
    }

    pub fn with_configuration_error(mut self, err: ApiError) -> Self {
        self.configuration = Err(err);
        self
    }

    pub fn with_response(mut self, body: Value) -> Self {
        self.response = Ok(body);
        self
    }

    pub fn with_post_error(mut self, err: ApiError) -> Self {
        self.response = Err(err);
        self
    }

    pub async fn configuration_fetches(&self) -> usize {
        self.recorded.read().await.configuration_fetches
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.read().await.requests.clone()
    }

    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.recorded.read().await.requests.last().cloned()
    }
}

impl Default for InMemoryApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiClient for InMemoryApiClient {
    async fn fetch_configuration(&self) -> Result<Configuration, ApiError> {
        self.recorded.write().await.configuration_fetches += 1;
        self.configuration.clone().map(Configuration::new)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.recorded.write().await.requests.push(RecordedRequest {
            path: path.to_owned(),
            body,
        });
        self.response.clone()
    }

    fn metadata(&self) -> &ClientMetadata {
        &self.metadata
    }
}

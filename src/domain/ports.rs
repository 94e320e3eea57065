use super::configuration::Configuration;
use super::metadata::ClientMetadata;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// The processor API client the tokenization client talks through.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn fetch_configuration(&self) -> Result<Configuration, ApiError>;
    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError>;
    /// Correlation metadata attached to every request made through this client.
    fn metadata(&self) -> &ClientMetadata;
}

pub type ApiClientRef = Arc<dyn ApiClient>;

/// A payment authorized on the device payment sheet.
///
/// The tokenization client only reads these fields; the payment data itself
/// stays opaque and is forwarded to the processor as-is.
pub trait DevicePayment: Send + Sync {
    fn payment_data(&self) -> &[u8];
    fn transaction_identifier(&self) -> &str;
    fn payment_instrument_name(&self) -> &str;
    fn payment_network(&self) -> &str;
}

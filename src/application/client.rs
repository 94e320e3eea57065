use super::request::build_request;
use crate::domain::configuration::{Configuration, PaymentRequestTemplate};
use crate::domain::payment::TokenizedPayment;
use crate::domain::ports::{ApiClientRef, DevicePayment};
use crate::error::{Result, TokenizationError};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Processor resource that exchanges device payment tokens for nonces.
pub const APPLE_PAY_TOKENS_PATH: &str = "v1/payment_methods/apple_payment_tokens";

/// Turns device payments into processor-issued nonces.
///
/// Every call is independent: one configuration fetch, an eligibility check,
/// and at most one tokenization POST. Nothing is cached between calls and no
/// request is retried.
#[derive(Clone, Default)]
pub struct ApplePayClient {
    api_client: Option<ApiClientRef>,
}

impl ApplePayClient {
    pub fn new(api_client: ApiClientRef) -> Self {
        Self {
            api_client: Some(api_client),
        }
    }

    pub fn api_client(&self) -> Option<&ApiClientRef> {
        self.api_client.as_ref()
    }

    /// Rebinds (or unbinds) the API client used by subsequent calls.
    pub fn set_api_client(&mut self, api_client: Option<ApiClientRef>) {
        self.api_client = api_client;
    }

    fn bound_api_client(&self) -> Result<&ApiClientRef> {
        self.api_client.as_ref().ok_or_else(|| {
            TokenizationError::Integration(
                "ApplePayClient tokenization failed because no API client is bound".to_string(),
            )
        })
    }

    async fn fetch_configuration(&self) -> Result<Configuration> {
        self.bound_api_client()?
            .fetch_configuration()
            .await
            .map_err(TokenizationError::ConfigurationFetchFailed)
    }

    /// Fetches the merchant configuration and returns the pre-filled payment
    /// request, provided Apple Pay is enabled.
    pub async fn payment_request(&self) -> Result<PaymentRequestTemplate> {
        let apple_pay = self.fetch_configuration().await?.apple_pay();
        if !apple_pay.status.is_enabled() {
            return Err(TokenizationError::Unsupported);
        }
        Ok(apple_pay.payment_request())
    }

    /// Exchanges a device payment for a tokenized payment.
    #[instrument(skip_all, fields(network = payment.payment_network()))]
    pub async fn tokenize(&self, payment: &dyn DevicePayment) -> Result<TokenizedPayment> {
        let api_client = self.bound_api_client()?;

        let configuration = self.fetch_configuration().await?;
        let status = configuration.apple_pay_status();
        debug!(%status, "fetched configuration");
        if !status.is_enabled() {
            return Err(TokenizationError::Unsupported);
        }

        let body = build_request(payment, api_client.metadata());
        debug!(path = APPLE_PAY_TOKENS_PATH, "posting payment token");
        let response = api_client
            .post(APPLE_PAY_TOKENS_PATH, body)
            .await
            .map_err(TokenizationError::from_post_failure)?;

        let tokenized = TokenizedPayment::from_response(&response)?;
        debug!(card_type = ?tokenized.card_type, "payment tokenized");
        Ok(tokenized)
    }

    /// Runs [`tokenize`](Self::tokenize) on the tokio runtime and reports the
    /// outcome to `completion`.
    ///
    /// `completion` is `FnOnce` and is called on every path, so it runs
    /// exactly once per call unless the task is aborted.
    pub fn tokenize_with_completion<P, F>(&self, payment: P, completion: F) -> JoinHandle<()>
    where
        P: DevicePayment + 'static,
        F: FnOnce(Result<TokenizedPayment>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let result = client.tokenize(&payment).await;
            completion(result);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentToken;
    use crate::error::{ApiError, TokenizationErrorKind};
    use crate::infrastructure::in_memory::InMemoryApiClient;
    use serde_json::json;
    use std::sync::Arc;

    fn payment() -> PaymentToken {
        PaymentToken {
            payment_data: Vec::new(),
            transaction_identifier: "transaction-id".to_string(),
            payment_instrument_name: "payment-instrument-name".to_string(),
            payment_network: "payment-network".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_status_tokenizes() {
        let api = InMemoryApiClient::new()
            .with_configuration(json!({"applePay": {"status": "mock"}}))
            .with_response(json!({"applePayCards": [{"nonce": "fake-nonce"}]}));
        let client = ApplePayClient::new(Arc::new(api.clone()));

        let tokenized = client.tokenize(&payment()).await.unwrap();
        assert_eq!(tokenized.nonce, "fake-nonce");
        assert_eq!(tokenized.description, "");
        assert_eq!(api.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_status_is_unsupported() {
        let api = InMemoryApiClient::new()
            .with_configuration(json!({"applePay": {"status": "pilot"}}));
        let client = ApplePayClient::new(Arc::new(api.clone()));

        let err = client.tokenize(&payment()).await.unwrap_err();
        assert_eq!(err, TokenizationError::Unsupported);
        assert!(api.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_payload_is_propagated() {
        let rejection = ApiError::Status {
            status: 422,
            message: "Apple Pay token is invalid".to_string(),
            payload: Some(json!({"error": {"message": "Apple Pay token is invalid"}})),
        };
        let api = InMemoryApiClient::new()
            .with_configuration(json!({"applePay": {"status": "production"}}))
            .with_post_error(rejection.clone());
        let client = ApplePayClient::new(Arc::new(api));

        let err = client.tokenize(&payment()).await.unwrap_err();
        assert_eq!(err.kind(), TokenizationErrorKind::TokenizationRejected);
        assert_eq!(err.api_error(), Some(&rejection));
    }

    #[tokio::test]
    async fn test_payment_request_uses_configuration() {
        let api = InMemoryApiClient::new().with_configuration(json!({
            "applePay": {
                "status": "production",
                "countryCode": "GB",
                "currencyCode": "GBP",
                "merchantIdentifier": "merchant.com.example",
                "supportedNetworks": ["Visa"]
            }
        }));
        let client = ApplePayClient::new(Arc::new(api));

        let request = client.payment_request().await.unwrap();
        assert_eq!(request.currency_code.as_deref(), Some("GBP"));
        assert_eq!(request.supported_networks, vec!["visa"]);
    }

    #[tokio::test]
    async fn test_payment_request_when_disabled() {
        let api = InMemoryApiClient::new().with_configuration(json!({"applePay": {"status": "off"}}));
        let client = ApplePayClient::new(Arc::new(api));

        assert_eq!(
            client.payment_request().await.unwrap_err(),
            TokenizationError::Unsupported
        );
    }

    #[tokio::test]
    async fn test_rebinding_api_client() {
        let mut client = ApplePayClient::default();
        assert!(client.api_client().is_none());

        let api = InMemoryApiClient::new()
            .with_configuration(json!({"applePay": {"status": "production"}}))
            .with_response(json!({"applePayCards": [{"nonce": "n"}]}));
        client.set_api_client(Some(Arc::new(api)));
        assert!(client.tokenize(&payment()).await.is_ok());

        client.set_api_client(None);
        assert_eq!(
            client.tokenize(&payment()).await.unwrap_err().kind(),
            TokenizationErrorKind::Integration
        );
    }
}

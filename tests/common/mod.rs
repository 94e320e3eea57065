use applepay_tokenizer::domain::ports::DevicePayment;

/// Device payment with fixed token fields and empty payment data.
#[derive(Debug, Clone, Default)]
pub struct MockPayment;

impl DevicePayment for MockPayment {
    fn payment_data(&self) -> &[u8] {
        &[]
    }

    fn transaction_identifier(&self) -> &str {
        "transaction-id"
    }

    fn payment_instrument_name(&self) -> &str {
        "payment-instrument-name"
    }

    fn payment_network(&self) -> &str {
        "payment-network"
    }
}

#[allow(dead_code)]
pub fn production_configuration() -> serde_json::Value {
    serde_json::json!({
        "applePay": {
            "status": "production"
        }
    })
}

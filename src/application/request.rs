use crate::domain::metadata::ClientMetadata;
use crate::domain::ports::DevicePayment;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

/// Builds the body of an Apple Pay tokenization POST.
///
/// The raw payment data is base64 encoded; the remaining token fields are
/// copied verbatim under the processor's field names.
pub fn build_request(payment: &dyn DevicePayment, metadata: &ClientMetadata) -> Value {
    json!({
        "applePaymentToken": {
            "paymentData": STANDARD.encode(payment.payment_data()),
            "transactionIdentifier": payment.transaction_identifier(),
            "paymentInstrumentName": payment.payment_instrument_name(),
            "paymentNetwork": payment.payment_network(),
        },
        "_meta": {
            "source": metadata.source.as_str(),
            "integration": metadata.integration.as_str(),
            "sessionId": metadata.session_id(),
        },
    })
}

use super::ports::DevicePayment;
use crate::error::{Result, TokenizationError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An owned device payment, e.g. one exported from a device to a JSON file.
///
/// `paymentData` is carried base64-encoded on the wire and decoded on load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentToken {
    #[serde(deserialize_with = "deserialize_base64", default)]
    pub payment_data: Vec<u8>,
    pub transaction_identifier: String,
    pub payment_instrument_name: String,
    pub payment_network: String,
}

fn deserialize_base64<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

impl DevicePayment for PaymentToken {
    fn payment_data(&self) -> &[u8] {
        &self.payment_data
    }

    fn transaction_identifier(&self) -> &str {
        &self.transaction_identifier
    }

    fn payment_instrument_name(&self) -> &str {
        &self.payment_instrument_name
    }

    fn payment_network(&self) -> &str {
        &self.payment_network
    }
}

/// A payment method tokenized by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizedPayment {
    pub nonce: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(rename = "default")]
    pub is_default: bool,
}

impl TokenizedPayment {
    /// Reads the first entry of `applePayCards` from a tokenization response.
    pub fn from_response(body: &Value) -> Result<Self> {
        let card = body
            .get("applePayCards")
            .and_then(Value::as_array)
            .and_then(|cards| cards.first())
            .ok_or_else(|| {
                TokenizationError::MalformedResponse("missing `applePayCards` entry".to_string())
            })?;

        let nonce = card
            .get("nonce")
            .and_then(Value::as_str)
            .filter(|nonce| !nonce.is_empty())
            .ok_or_else(|| {
                TokenizationError::MalformedResponse("card has no `nonce`".to_string())
            })?;

        Ok(Self {
            nonce: nonce.to_owned(),
            description: card
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            card_type: card
                .pointer("/details/cardType")
                .and_then(Value::as_str)
                .map(str::to_owned),
            is_default: card
                .get("default")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }
}

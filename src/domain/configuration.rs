use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Merchant configuration as returned by the gateway.
///
/// The document is kept loosely typed. Every accessor is total: a missing or
/// wrongly typed field reads as absent rather than failing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    json: Value,
}

impl Configuration {
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Walks nested objects by key, returning `None` as soon as a step is missing.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.json, |node, key| node.as_object()?.get(*key))
    }

    fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    pub fn apple_pay_status(&self) -> ApplePayStatus {
        match self.get_path(&["applePay", "status"]) {
            Some(Value::String(status)) => ApplePayStatus::parse(status),
            Some(other) => ApplePayStatus::Unrecognized(other.to_string()),
            None => ApplePayStatus::Missing,
        }
    }

    /// Eligibility gate for Apple Pay.
    pub fn is_apple_pay_enabled(&self) -> bool {
        self.apple_pay_status().is_enabled()
    }

    pub fn apple_pay(&self) -> ApplePayConfiguration {
        let supported_networks = self
            .get_path(&["applePay", "supportedNetworks"])
            .and_then(Value::as_array)
            .map(|networks| {
                networks
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        ApplePayConfiguration {
            status: self.apple_pay_status(),
            country_code: self.get_str(&["applePay", "countryCode"]).map(str::to_owned),
            currency_code: self
                .get_str(&["applePay", "currencyCode"])
                .map(str::to_owned),
            merchant_identifier: self
                .get_str(&["applePay", "merchantIdentifier"])
                .map(str::to_owned),
            supported_networks,
        }
    }
}

impl From<Value> for Configuration {
    fn from(json: Value) -> Self {
        Self::new(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplePayStatus {
    Off,
    /// Sandbox acceptance: tokenization succeeds against test cards only.
    Mock,
    Production,
    Unrecognized(String),
    Missing,
}

impl ApplePayStatus {
    fn parse(raw: &str) -> Self {
        match raw {
            "off" => ApplePayStatus::Off,
            "mock" => ApplePayStatus::Mock,
            "production" => ApplePayStatus::Production,
            other => ApplePayStatus::Unrecognized(other.to_owned()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ApplePayStatus::Mock | ApplePayStatus::Production)
    }
}

impl fmt::Display for ApplePayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplePayStatus::Off => f.write_str("off"),
            ApplePayStatus::Mock => f.write_str("mock"),
            ApplePayStatus::Production => f.write_str("production"),
            ApplePayStatus::Unrecognized(raw) => write!(f, "unrecognized ({raw})"),
            ApplePayStatus::Missing => f.write_str("missing"),
        }
    }
}

/// Typed view of the `applePay` section of the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplePayConfiguration {
    pub status: ApplePayStatus,
    pub country_code: Option<String>,
    pub currency_code: Option<String>,
    pub merchant_identifier: Option<String>,
    pub supported_networks: Vec<String>,
}

impl ApplePayConfiguration {
    /// Pre-fills a payment request with the merchant's Apple Pay settings.
    pub fn payment_request(&self) -> PaymentRequestTemplate {
        PaymentRequestTemplate {
            country_code: self.country_code.clone(),
            currency_code: self.currency_code.clone(),
            merchant_identifier: self.merchant_identifier.clone(),
            supported_networks: self
                .supported_networks
                .iter()
                .map(|network| network.to_lowercase())
                .collect(),
        }
    }
}

/// The merchant-specific part of a device payment request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestTemplate {
    pub country_code: Option<String>,
    pub currency_code: Option<String>,
    pub merchant_identifier: Option<String>,
    pub supported_networks: Vec<String>,
}

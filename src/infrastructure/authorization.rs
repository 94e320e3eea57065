use crate::error::{Result, TokenizationError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use url::Url;

/// Gateway environment encoded in a tokenization key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Sandbox,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "development" => Some(Environment::Development),
            "sandbox" => Some(Environment::Sandbox),
            "production" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn root_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:3000",
            Environment::Sandbox => "https://api.sandbox.braintreegateway.com",
            Environment::Production => "https://api.braintreegateway.com:443",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientTokenClaims {
    authorization_fingerprint: String,
    client_api_url: String,
}

/// Credentials an API client presents to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// `<environment>_<random>_<merchantId>`, sent as the `Client-Key` header.
    TokenizationKey {
        key: String,
        environment: Environment,
        merchant_id: String,
    },
    /// A base64 encoded client token, sent as `authorization_fingerprint`.
    ClientToken {
        authorization_fingerprint: String,
        client_api_url: String,
    },
}

impl Authorization {
    /// Accepts either a tokenization key or a client token.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        Self::tokenization_key(raw).or_else(|_| Self::client_token(raw))
    }

    pub fn tokenization_key(raw: &str) -> Result<Self> {
        let invalid = || TokenizationError::Integration(format!("invalid tokenization key `{raw}`"));

        let mut parts = raw.splitn(3, '_');
        let (Some(environment), Some(random), Some(merchant_id)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let alphanumeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric());
        if !alphanumeric(random)
            || merchant_id.is_empty()
            || !merchant_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(invalid());
        }
        let environment = Environment::parse(environment).ok_or_else(invalid)?;

        Ok(Authorization::TokenizationKey {
            key: raw.to_owned(),
            environment,
            merchant_id: merchant_id.to_owned(),
        })
    }

    pub fn client_token(raw: &str) -> Result<Self> {
        let invalid = |reason: String| {
            TokenizationError::Integration(format!("invalid client token: {reason}"))
        };

        let decoded = STANDARD
            .decode(raw.as_bytes())
            .map_err(|e| invalid(e.to_string()))?;
        let claims: ClientTokenClaims =
            serde_json::from_slice(&decoded).map_err(|e| invalid(e.to_string()))?;

        Ok(Authorization::ClientToken {
            authorization_fingerprint: claims.authorization_fingerprint,
            client_api_url: claims.client_api_url,
        })
    }

    /// Root of the client API; always ends with `/` so relative paths join under it.
    pub fn base_url(&self) -> Result<Url> {
        let raw = match self {
            Authorization::TokenizationKey {
                environment,
                merchant_id,
                ..
            } => format!(
                "{}/merchants/{}/client_api/",
                environment.root_url(),
                merchant_id
            ),
            Authorization::ClientToken { client_api_url, .. } => client_api_url.clone(),
        };

        let url = Url::parse(&raw).map_err(|e| {
            TokenizationError::Integration(format!("invalid client API URL `{raw}`: {e}"))
        })?;
        Ok(with_trailing_slash(url))
    }
}

pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

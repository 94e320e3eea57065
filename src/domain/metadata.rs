use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Where the payment method originated, as reported to the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Unknown,
    Form,
    PayPalApp,
    PayPalBrowser,
    VenmoApp,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Unknown => "unknown",
            Source::Form => "form",
            Source::PayPalApp => "paypal-app",
            Source::PayPalBrowser => "paypal-browser",
            Source::VenmoApp => "venmo-app",
        }
    }
}

/// How the merchant app integrates with the processor SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integration {
    #[default]
    Custom,
    DropIn,
}

impl Integration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Integration::Custom => "custom",
            Integration::DropIn => "dropin",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Source::Unknown),
            "form" => Ok(Source::Form),
            "paypal-app" => Ok(Source::PayPalApp),
            "paypal-browser" => Ok(Source::PayPalBrowser),
            "venmo-app" => Ok(Source::VenmoApp),
            other => Err(format!("unknown source `{other}`")),
        }
    }
}

impl FromStr for Integration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(Integration::Custom),
            "dropin" | "drop-in" => Ok(Integration::DropIn),
            other => Err(format!("unknown integration `{other}`")),
        }
    }
}

/// Analytics and correlation fields sent as `_meta` with API requests.
///
/// The session id is generated once when the metadata is created, so every
/// request made through one API client shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMetadata {
    pub source: Source,
    pub integration: Integration,
    session_id: String,
}

impl ClientMetadata {
    pub fn new() -> Self {
        Self::with_session_id(Uuid::new_v4().simple().to_string())
    }

    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            source: Source::default(),
            integration: Integration::default(),
            session_id: session_id.into(),
        }
    }

    pub fn source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn integration(mut self, integration: Integration) -> Self {
        self.integration = integration;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Default for ClientMetadata {
    fn default() -> Self {
        Self::new()
    }
}

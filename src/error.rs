use serde_json::Value;
use thiserror::Error;

pub type Result<T, E = TokenizationError> = std::result::Result<T, E>;

/// Failure reported by an [`ApiClient`](crate::domain::ports::ApiClient).
///
/// The tokenization client never rewraps or alters these; it hands them back
/// to the caller inside the matching [`TokenizationError`] variant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server responded with status {status}: {message}")]
    Status {
        status: u16,
        message: String,
        payload: Option<Value>,
    },
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the server attached a parsed error document to the response.
    pub fn has_error_payload(&self) -> bool {
        matches!(self, ApiError::Status { payload: Some(_), .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizationErrorKind {
    Integration,
    Unsupported,
    ConfigurationFetchFailed,
    TokenizationTransportFailed,
    TokenizationRejected,
    MalformedResponse,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizationError {
    /// The caller wired the client incorrectly, e.g. no API client bound.
    #[error("integration error: {0}")]
    Integration(String),
    /// Apple Pay is disabled by the merchant configuration.
    #[error("Apple Pay is not enabled for this merchant")]
    Unsupported,
    #[error("failed to fetch configuration: {0}")]
    ConfigurationFetchFailed(#[source] ApiError),
    #[error("tokenization request failed: {0}")]
    TokenizationTransportFailed(#[source] ApiError),
    #[error("tokenization rejected by processor: {0}")]
    TokenizationRejected(#[source] ApiError),
    #[error("malformed tokenization response: {0}")]
    MalformedResponse(String),
}

impl TokenizationError {
    pub fn kind(&self) -> TokenizationErrorKind {
        match self {
            TokenizationError::Integration(_) => TokenizationErrorKind::Integration,
            TokenizationError::Unsupported => TokenizationErrorKind::Unsupported,
            TokenizationError::ConfigurationFetchFailed(_) => {
                TokenizationErrorKind::ConfigurationFetchFailed
            }
            TokenizationError::TokenizationTransportFailed(_) => {
                TokenizationErrorKind::TokenizationTransportFailed
            }
            TokenizationError::TokenizationRejected(_) => {
                TokenizationErrorKind::TokenizationRejected
            }
            TokenizationError::MalformedResponse(_) => TokenizationErrorKind::MalformedResponse,
        }
    }

    /// The collaborator error this failure carries, exactly as it was returned.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            TokenizationError::ConfigurationFetchFailed(e)
            | TokenizationError::TokenizationTransportFailed(e)
            | TokenizationError::TokenizationRejected(e) => Some(e),
            _ => None,
        }
    }

    /// Sorts a failed tokenization POST into rejected vs. transport failures.
    pub fn from_post_failure(err: ApiError) -> Self {
        if err.has_error_payload() {
            TokenizationError::TokenizationRejected(err)
        } else {
            TokenizationError::TokenizationTransportFailed(err)
        }
    }
}

/// Failures reading command-line input or writing reports.
#[derive(Error, Debug)]
pub enum InterfaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

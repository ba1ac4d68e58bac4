use thiserror::Error;

/// Unified error type for the vocabulary service.
///
/// Remote failures carry a structured classification so retry logic and
/// HTTP status mapping never have to inspect provider-specific payloads.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Provider response is not valid JSON: {message}")]
    Parse { message: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Remote error: HTTP {status} ({class}): {message}")]
    Remote {
        status: u16,
        class: String,
        message: String,
        retryable: bool,
        retry_after_ms: Option<u64>,
    },

    #[error("Retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("{message}")]
    Lookup {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },
}

impl Error {
    /// Whether this error is a rate-limit signal from the provider:
    /// HTTP 429 or a `RESOURCE_EXHAUSTED`-class rejection. These are the
    /// only errors the retry wrapper will wait out.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Error::Remote { status, class, .. } => {
                *status == 429 || class == "rate_limited" || class == "quota_exhausted"
            }
            _ => false,
        }
    }

    /// Provider-supplied retry hint in milliseconds, when one was present
    /// in the error payload.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Error::Remote { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }
}

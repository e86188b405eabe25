//! Error taxonomy shared by every askdocs component.
//!
//! | Variant | Raised by | Surfaced |
//! |---------|-----------|----------|
//! | [`Validation`](RagError::Validation) | input shape/length checks | immediately |
//! | [`PolicyViolation`](RagError::PolicyViolation) | guardrail rejects | immediately, with remediation |
//! | [`ProviderConfig`](RagError::ProviderConfig) | provider selection / validation | at startup or first use |
//! | [`ProviderCall`](RagError::ProviderCall) | network / HTTP failures | after the retry budget is spent |
//! | [`CorruptedData`](RagError::CorruptedData) | vector decoding | immediately |
//! | [`Persistence`](RagError::Persistence) | store writes/reads | after rollback |
//! | [`Cancelled`](RagError::Cancelled) | cancellation tokens | immediately |

use thiserror::Error;

/// Errors produced by the askdocs pipeline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RagError {
    /// Bad input shape or length.
    #[error("validation error: {0}")]
    Validation(String),

    /// A guardrail rejected the input.
    #[error("content policy violation: {message}")]
    PolicyViolation {
        message: String,
        suggestion: Option<String>,
    },

    /// Missing or invalid provider configuration.
    #[error("provider configuration error: {0}")]
    ProviderConfig(String),

    /// A provider call failed. `status` is the upstream HTTP status when
    /// the server answered at all.
    #[error("{provider} call failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    ProviderCall {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    /// A stored vector could not be decoded or repaired.
    #[error("corrupted data: {0}")]
    CorruptedData(String),

    /// The document store failed; any open transaction was rolled back.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

impl RagError {
    pub fn provider_call(provider: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        RagError::ProviderCall {
            provider: provider.to_string(),
            status,
            message: message.into(),
        }
    }

    /// Whether the backoff retrier should attempt the operation again.
    ///
    /// Provider failures are transient unless the upstream answered with a
    /// 4xx other than 429; everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            RagError::ProviderCall { status, .. } => match status {
                Some(429) => true,
                Some(s) => !(400..500).contains(s),
                None => true,
            },
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RagError>;

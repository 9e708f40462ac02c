//! Generation port
//!
//! Defines the interface for the text-generation backend that turns a
//! worker identity plus a resolved prompt into an answer. The orchestrator
//! never talks to a provider directly and never retries; a failure here
//! propagates to the scheduler as-is.

use async_trait::async_trait;
use consilium_domain::Worker;
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation timed out")]
    Timeout,

    #[error("rate limited by the generation backend")]
    RateLimited,

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response from the generation backend: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Stable category label used in user-facing failure summaries
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Timeout => "timeout",
            GenerationError::RateLimited => "rate-limited",
            GenerationError::Network(_) => "network",
            GenerationError::InvalidResponse(_) => "invalid-response",
        }
    }
}

/// Generation capability injected into the orchestrator
///
/// Implementations (adapters) live in the infrastructure layer; tests
/// substitute deterministic stubs. The `identity` is the worker on whose
/// behalf the call is made and `system_prompt` its fixed preamble.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        identity: &Worker,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<String, GenerationError>;
}

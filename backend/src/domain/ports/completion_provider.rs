//! Driven port for the LLM chat-completion provider.
//!
//! The domain owns the request shape (see [`crate::domain::prompt`]); adapters
//! translate it to a concrete wire format and report failures through
//! [`CompletionProviderError`].

use async_trait::async_trait;

use crate::domain::CompletionRequest;

use super::define_port_error;

/// Completion returned by the provider.
///
/// `content` is the text of the first choice, or `None` when the provider
/// answered without one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    pub content: Option<String>,
}

impl Completion {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

define_port_error! {
    /// Errors surfaced while requesting a completion.
    pub enum CompletionProviderError {
        /// No API credential is configured for the provider.
        NotConfigured => "completion provider is not configured",
        /// The provider answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "completion provider rejected request ({status}): {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "completion provider transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "completion provider timeout: {message}",
        /// The success body could not be decoded.
        Decode { message: String } =>
            "completion provider response decode failed: {message}",
    }
}

/// Port for requesting one chat completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `request` and return the first completion choice.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, CompletionProviderError>;
}

/// Provider wired when no API key is available.
///
/// Every call fails with [`CompletionProviderError::NotConfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredCompletionProvider;

#[async_trait]
impl CompletionProvider for UnconfiguredCompletionProvider {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<Completion, CompletionProviderError> {
        Err(CompletionProviderError::not_configured())
    }
}

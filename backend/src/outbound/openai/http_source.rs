//! Reqwest-backed chat-completion adapter.
//!
//! This adapter owns transport details only: request serialisation, bearer
//! authentication, timeout and status mapping, and decoding of the first
//! completion choice.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto, ProviderErrorDto};
use crate::domain::CompletionRequest;
use crate::domain::ports::{Completion, CompletionProvider, CompletionProviderError};
use crate::outbound::http_support::{body_preview, join_path};

const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

/// Completion adapter posting to `{base_url}/v1/chat/completions`.
pub struct OpenAiCompletionSource {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl std::fmt::Debug for OpenAiCompletionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompletionSource")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

/// Errors raised while constructing [`OpenAiCompletionSource`].
#[derive(Debug, thiserror::Error)]
pub enum OpenAiSourceBuildError {
    #[error("invalid completion endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl OpenAiCompletionSource {
    /// Build an adapter for the provider at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint cannot be derived from `base_url`
    /// or the reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, OpenAiSourceBuildError> {
        let endpoint = join_path(base_url, CHAT_COMPLETIONS_PATH)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionSource {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, CompletionProviderError> {
        let payload = ChatCompletionRequestDto::from(request);
        debug!(model = payload.model, endpoint = %self.endpoint, "requesting chat completion");
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_completion(body.as_ref())
    }
}

fn parse_completion(body: &[u8]) -> Result<Completion, CompletionProviderError> {
    serde_json::from_slice::<ChatCompletionResponseDto>(body)
        .map(ChatCompletionResponseDto::into_completion)
        .map_err(|error| {
            CompletionProviderError::decode(format!("invalid completion JSON payload: {error}"))
        })
}

fn map_transport_error(error: reqwest::Error) -> CompletionProviderError {
    if error.is_timeout() {
        CompletionProviderError::timeout(error.to_string())
    } else {
        CompletionProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionProviderError {
    let message = ProviderErrorDto::message(body).unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            format!("OpenAI API error (status {})", status.as_u16())
        } else {
            format!("OpenAI API error (status {}): {preview}", status.as_u16())
        }
    });
    CompletionProviderError::rejected(status.as_u16(), message)
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;

//! OpenAI-compatible chat-completion adapter.
//!
//! Implements the `CompletionProvider` port over HTTP. Any provider that
//! speaks the `/v1/chat/completions` dialect can be targeted by changing the
//! base URL.

mod dto;
mod http_source;

pub use http_source::{OpenAiCompletionSource, OpenAiSourceBuildError};

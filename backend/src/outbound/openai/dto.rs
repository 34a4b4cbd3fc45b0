//! Wire DTOs for the OpenAI-compatible chat-completions API.
//!
//! Requests borrow from the domain [`CompletionRequest`]; responses decode
//! only the fields the adapter reads.

use serde::{Deserialize, Serialize};

use crate::domain::ports::Completion;
use crate::domain::{ChatMessage, CompletionRequest, ContentPart, MessageContent};

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: Vec<ChatMessageDto<'a>>,
    pub(super) max_tokens: u32,
    pub(super) temperature: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: MessageContentDto<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum MessageContentDto<'a> {
    Text(&'a str),
    Parts(Vec<ContentPartDto<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum ContentPartDto<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrlDto<'a> },
}

#[derive(Debug, Serialize)]
pub(super) struct ImageUrlDto<'a> {
    pub(super) url: &'a str,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionRequestDto<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: request.settings.model,
            messages: request.messages.iter().map(ChatMessageDto::from).collect(),
            max_tokens: request.settings.max_tokens,
            temperature: request.settings.temperature,
        }
    }
}

impl<'a> From<&'a ChatMessage> for ChatMessageDto<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        let content = match &message.content {
            MessageContent::Text(text) => MessageContentDto::Text(text),
            MessageContent::Parts(parts) => {
                MessageContentDto::Parts(parts.iter().map(ContentPartDto::from).collect())
            }
        };
        Self {
            role: message.role.as_str(),
            content,
        }
    }
}

impl<'a> From<&'a ContentPart> for ContentPartDto<'a> {
    fn from(part: &'a ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => Self::Text { text },
            ContentPart::ImageUrl(url) => Self::ImageUrl {
                image_url: ImageUrlDto { url },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceDto {
    pub(super) message: Option<ChoiceMessageDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceMessageDto {
    pub(super) content: Option<String>,
}

impl ChatCompletionResponseDto {
    /// Keep the first choice's content; later choices are ignored.
    pub(super) fn into_completion(self) -> Completion {
        Completion {
            content: self
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message)
                .and_then(|message| message.content),
        }
    }
}

/// Error body returned by the provider on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(super) struct ProviderErrorDto {
    pub(super) error: Option<ProviderErrorDetailDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProviderErrorDetailDto {
    pub(super) message: Option<String>,
}

impl ProviderErrorDto {
    pub(super) fn message(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .and_then(|dto| dto.error)
            .and_then(|detail| detail.message)
            .filter(|message| !message.trim().is_empty())
    }
}

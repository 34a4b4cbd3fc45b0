//! Prompt construction for the homework tutor.
//!
//! The conversation sent to the completion provider is always exactly two
//! messages: the fixed tutor instruction followed by one user message whose
//! shape depends only on which [`Question`] variant was supplied.

use super::Question;

/// Tutor instruction sent as the first message of every conversation.
pub const SYSTEM_PROMPT: &str = "You are an expert homework tutor. Your job is to help students understand and solve their homework problems step-by-step.

IMPORTANT GUIDELINES:
- Provide detailed, step-by-step explanations
- Show your work clearly at each step
- Explain the reasoning behind each step
- Use simple language appropriate for students
- If it's a math problem, show all calculations
- If it's a science problem, explain the concepts involved
- If it's a language problem, break down grammar or vocabulary
- Always encourage learning and understanding, not just giving answers
- End with a summary of key concepts learned

Format your response with clear sections and bullet points where helpful.";

const IMAGE_ONLY_PROMPT: &str = "Please solve this homework problem shown in the image.";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    /// Wire name used by chat-completion APIs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// One part of a multimodal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    ImageUrl(String),
}

/// Message body: either plain text or an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: MessageContent,
}

impl ChatMessage {
    fn system(text: &str) -> Self {
        Self {
            role: ChatRole::System,
            content: MessageContent::Text(text.to_owned()),
        }
    }

    fn user(content: MessageContent) -> Self {
        Self {
            role: ChatRole::User,
            content,
        }
    }
}

/// Fixed sampling parameters for homework completions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSettings {
    pub model: &'static str,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionSettings {
    pub const MODEL: &'static str = "gpt-4o";
    pub const MAX_TOKENS: u32 = 1500;
    pub const TEMPERATURE: f64 = 0.7;

    /// The only settings the service ever sends.
    pub const fn homework_tutor() -> Self {
        Self {
            model: Self::MODEL,
            max_tokens: Self::MAX_TOKENS,
            temperature: Self::TEMPERATURE,
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::homework_tutor()
    }
}

/// A complete request for the completion provider.
///
/// # Examples
/// ```
/// use homework_backend::domain::{ChatRole, CompletionRequest, Question};
///
/// let question = Question::try_from_parts(Some("2+2?"), None).unwrap();
/// let request = CompletionRequest::for_question(&question);
/// assert_eq!(request.settings.model, "gpt-4o");
/// assert_eq!(request.messages.len(), 2);
/// assert_eq!(request.messages[0].role, ChatRole::System);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub settings: CompletionSettings,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    pub fn for_question(question: &Question) -> Self {
        Self {
            settings: CompletionSettings::homework_tutor(),
            messages: build_messages(question),
        }
    }
}

/// Build the `[system, user]` conversation for `question`.
pub fn build_messages(question: &Question) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), user_message(question)]
}

fn user_message(question: &Question) -> ChatMessage {
    let content = match question {
        Question::Both { text, image_url } => MessageContent::Parts(vec![
            ContentPart::Text(format!(
                "Please solve this homework problem. Here's the question text: \"{text}\" and I've also included an image."
            )),
            ContentPart::ImageUrl(image_url.clone()),
        ]),
        Question::ImageOnly(image_url) => MessageContent::Parts(vec![
            ContentPart::Text(IMAGE_ONLY_PROMPT.to_owned()),
            ContentPart::ImageUrl(image_url.clone()),
        ]),
        Question::TextOnly(text) => {
            MessageContent::Text(format!("Please solve this homework problem: {text}"))
        }
    };
    ChatMessage::user(content)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the three prompt shapes.
    use super::*;
    use rstest::rstest;

    fn question(text: Option<&str>, image: Option<&str>) -> Question {
        Question::try_from_parts(text, image).expect("valid question")
    }

    #[rstest]
    #[case(Some("2x+5=15"), None)]
    #[case(None, Some("https://img.test/q.png"))]
    #[case(Some("Label the parts"), Some("https://img.test/q.png"))]
    fn system_message_is_first_and_unconditional(
        #[case] text: Option<&str>,
        #[case] image: Option<&str>,
    ) {
        let messages = build_messages(&question(text, image));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(messages[1].role, ChatRole::User);
    }

    #[rstest]
    fn text_only_uses_plain_string_content() {
        let messages = build_messages(&question(Some("Solve for x: 2x+5=15"), None));
        assert_eq!(
            messages[1].content,
            MessageContent::Text("Please solve this homework problem: Solve for x: 2x+5=15".into())
        );
    }

    #[rstest]
    fn image_only_uses_fixed_text_and_image_part() {
        let messages = build_messages(&question(None, Some("data:image/png;base64,AAAA")));
        assert_eq!(
            messages[1].content,
            MessageContent::Parts(vec![
                ContentPart::Text(
                    "Please solve this homework problem shown in the image.".into()
                ),
                ContentPart::ImageUrl("data:image/png;base64,AAAA".into()),
            ])
        );
    }

    #[rstest]
    fn both_quotes_text_and_attaches_image() {
        let messages = build_messages(&question(Some("What is x?"), Some("https://img.test/a.png")));
        assert_eq!(
            messages[1].content,
            MessageContent::Parts(vec![
                ContentPart::Text(
                    "Please solve this homework problem. Here's the question text: \"What is x?\" and I've also included an image."
                        .into()
                ),
                ContentPart::ImageUrl("https://img.test/a.png".into()),
            ])
        );
    }

    #[rstest]
    fn settings_are_fixed() {
        let request = CompletionRequest::for_question(&question(Some("q"), None));
        assert_eq!(request.settings, CompletionSettings::default());
        assert_eq!(request.settings.model, "gpt-4o");
        assert_eq!(request.settings.max_tokens, 1500);
        assert!((request.settings.temperature - 0.7).abs() < f64::EPSILON);
    }
}

//! Homework question supplied by the caller.
//!
//! A question is text, an image reference, or both. The empty combination is
//! rejected at construction so every downstream consumer (prompt building,
//! persistence) can match on exactly three shapes.

use std::fmt;

/// Validation error raised when no question content was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    /// Neither question text nor an image reference was provided.
    NoQuestionProvided,
}

impl fmt::Display for QuestionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoQuestionProvided => write!(f, "No question provided"),
        }
    }
}

impl std::error::Error for QuestionValidationError {}

/// A validated homework question.
///
/// The image reference is kept exactly as the caller sent it (a URL or a
/// `data:` URI); its content is not inspected.
///
/// # Examples
/// ```
/// use homework_backend::domain::Question;
///
/// let question = Question::try_from_parts(Some("Solve for x: 2x+5=15"), None).unwrap();
/// assert_eq!(question.text(), Some("Solve for x: 2x+5=15"));
/// assert_eq!(question.image_url(), None);
///
/// assert!(Question::try_from_parts(Some("  "), Some("")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    TextOnly(String),
    ImageOnly(String),
    Both { text: String, image_url: String },
}

impl Question {
    /// Build a question from optional raw inputs.
    ///
    /// Absent, empty and whitespace-only inputs all count as "not provided".
    pub fn try_from_parts(
        text: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Self, QuestionValidationError> {
        let text = text.filter(|value| !value.trim().is_empty());
        let image_url = image_url.filter(|value| !value.trim().is_empty());
        match (text, image_url) {
            (Some(text), Some(image_url)) => Ok(Self::Both {
                text: text.to_owned(),
                image_url: image_url.to_owned(),
            }),
            (Some(text), None) => Ok(Self::TextOnly(text.to_owned())),
            (None, Some(image_url)) => Ok(Self::ImageOnly(image_url.to_owned())),
            (None, None) => Err(QuestionValidationError::NoQuestionProvided),
        }
    }

    /// Question text, when supplied.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::TextOnly(text) | Self::Both { text, .. } => Some(text),
            Self::ImageOnly(_) => None,
        }
    }

    /// Image reference, when supplied.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::ImageOnly(image_url) | Self::Both { image_url, .. } => Some(image_url),
            Self::TextOnly(_) => None,
        }
    }
}

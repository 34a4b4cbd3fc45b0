//! Homework session entities.
//!
//! A homework session records one solved question for one user. Sessions are
//! created once per successful solve and never updated by this service.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Question, UserId};

/// Error returned when a completion carries no usable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptySolutionError;

impl fmt::Display for EmptySolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solution must not be empty")
    }
}

impl std::error::Error for EmptySolutionError {}

/// Generated solution text.
///
/// ## Invariants
/// - Never empty or whitespace-only.
///
/// # Examples
/// ```
/// use homework_backend::domain::Solution;
///
/// assert!(Solution::new("x = 5").is_ok());
/// assert!(Solution::new("\n").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution(String);

impl Solution {
    pub fn new(text: impl Into<String>) -> Result<Self, EmptySolutionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptySolutionError);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Insert payload for a homework session.
///
/// The store assigns the id and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHomeworkSession {
    user_id: UserId,
    question: Question,
    solution: Solution,
}

impl NewHomeworkSession {
    pub fn new(user_id: UserId, question: Question, solution: Solution) -> Self {
        Self {
            user_id,
            question,
            solution,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Question text, or `None` when only an image was supplied.
    pub fn question_text(&self) -> Option<&str> {
        self.question.text()
    }

    /// Image reference, or `None` when only text was supplied.
    pub fn question_image_url(&self) -> Option<&str> {
        self.question.image_url()
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }
}

/// A stored homework session as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub question_text: Option<String>,
    pub question_image_url: Option<String>,
    pub solution: String,
    pub created_at: DateTime<Utc>,
}

impl HomeworkSession {
    /// Materialise a stored row from an insert payload and store-assigned
    /// values.
    pub fn from_new(new: &NewHomeworkSession, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: *new.user_id(),
            question_text: new.question_text().map(str::to_owned),
            question_image_url: new.question_image_url().map(str::to_owned),
            solution: new.solution().as_str().to_owned(),
            created_at,
        }
    }
}

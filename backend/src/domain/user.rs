//! Authenticated user identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the identity provider.
///
/// Serialises as the canonical hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    ///
    /// # Examples
    /// ```
    /// use homework_backend::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new(" ").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap a UUID already known to be a user id (e.g. read from storage).
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// User resolved from a bearer token for the duration of one request.
///
/// Never cached or persisted; only [`AuthenticatedUser::id`] is attached to
/// stored homework sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id: UserId,
    email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

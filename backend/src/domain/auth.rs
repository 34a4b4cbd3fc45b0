//! Bearer credential primitives.
//!
//! The inbound adapter hands the raw `Authorization` header value to
//! [`BearerToken::from_authorization_header`]; the identity provider port is
//! the only consumer of the token itself.

use std::fmt;

use zeroize::Zeroizing;

const BEARER_SCHEME: &str = "bearer";

/// Domain error returned when an `Authorization` value is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BearerTokenError {
    /// The header does not use the `Bearer` scheme.
    UnsupportedScheme,
    /// The scheme is present but the token is blank.
    EmptyToken,
}

impl fmt::Display for BearerTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedScheme => write!(f, "authorization must use the Bearer scheme"),
            Self::EmptyToken => write!(f, "bearer token must not be empty"),
        }
    }
}

impl std::error::Error for BearerTokenError {}

/// Opaque bearer credential forwarded unchanged to the identity provider.
///
/// ## Invariants
/// - The token is non-empty and contains no surrounding whitespace.
/// - The secret is zeroed on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use homework_backend::domain::BearerToken;
///
/// let token = BearerToken::from_authorization_header("Bearer abc.def").unwrap();
/// assert_eq!(token.expose(), "abc.def");
/// assert_eq!(format!("{token:?}"), "BearerToken(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Parse an `Authorization` header value of the form `Bearer <token>`.
    ///
    /// The scheme comparison is case-insensitive.
    pub fn from_authorization_header(value: &str) -> Result<Self, BearerTokenError> {
        let trimmed = value.trim();
        let (scheme, token) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(BearerTokenError::UnsupportedScheme);
        }
        Self::new(token)
    }

    /// Wrap a raw token.
    pub fn new(token: &str) -> Result<Self, BearerTokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(BearerTokenError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(token.to_owned())))
    }

    /// The raw token, for adapters that must forward it.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc", "abc")]
    #[case("bearer   abc  ", "abc")]
    #[case("BEARER eyJhbGciOi.payload.sig", "eyJhbGciOi.payload.sig")]
    fn parses_bearer_headers(#[case] header: &str, #[case] expected: &str) {
        let token = BearerToken::from_authorization_header(header).expect("valid header");
        assert_eq!(token.expose(), expected);
    }

    #[rstest]
    #[case("", BearerTokenError::UnsupportedScheme)]
    #[case("Basic dXNlcjpwYXNz", BearerTokenError::UnsupportedScheme)]
    #[case("abc", BearerTokenError::UnsupportedScheme)]
    #[case("Bearer", BearerTokenError::EmptyToken)]
    #[case("Bearer    ", BearerTokenError::EmptyToken)]
    fn rejects_unusable_headers(#[case] header: &str, #[case] expected: BearerTokenError) {
        let err = BearerToken::from_authorization_header(header).expect_err("invalid header");
        assert_eq!(err, expected);
    }
}

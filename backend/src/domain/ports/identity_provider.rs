//! Driven port resolving bearer tokens to users.
//!
//! The caller's token is forwarded unchanged; the provider decides whether it
//! is valid. Nothing about the resolved user is cached between requests.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, BearerToken, UserId};

use super::define_port_error;

/// Token accepted by [`FixtureIdentityProvider`].
pub const FIXTURE_TOKEN: &str = "fixture-token";

/// User id returned by [`FixtureIdentityProvider`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The token is unknown, expired or revoked.
        InvalidToken { message: String } =>
            "identity provider rejected token: {message}",
        /// The provider could not be reached or answered unexpectedly.
        Transport { message: String } =>
            "identity provider transport failed: {message}",
        /// The provider answered with an unreadable user payload.
        Decode { message: String } =>
            "identity provider response decode failed: {message}",
    }
}

/// Port for resolving the caller behind a bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve `token` to the user it was issued for.
    async fn resolve_user(
        &self,
        token: &BearerToken,
    ) -> Result<AuthenticatedUser, IdentityProviderError>;
}

/// Fixture provider for local runs without an identity service.
///
/// Only [`FIXTURE_TOKEN`] resolves; it maps to [`FIXTURE_USER_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn resolve_user(
        &self,
        token: &BearerToken,
    ) -> Result<AuthenticatedUser, IdentityProviderError> {
        if token.expose() != FIXTURE_TOKEN {
            return Err(IdentityProviderError::invalid_token("unknown fixture token"));
        }
        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        Ok(AuthenticatedUser::new(id, Some("student@example.com".to_owned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_fixture_token() {
        let token = BearerToken::new(FIXTURE_TOKEN).expect("token");
        let user = FixtureIdentityProvider
            .resolve_user(&token)
            .await
            .expect("fixture token resolves");
        assert_eq!(user.id().to_string(), FIXTURE_USER_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_rejects_other_tokens() {
        let token = BearerToken::new("someone-else").expect("token");
        let err = FixtureIdentityProvider
            .resolve_user(&token)
            .await
            .expect_err("unknown token");
        assert!(matches!(err, IdentityProviderError::InvalidToken { .. }));
    }
}

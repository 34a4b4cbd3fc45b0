//! Reqwest-backed Supabase Auth adapter.
//!
//! The caller's token is forwarded unchanged alongside the project's anon
//! key; the auth service answers with the user record or a 401/403.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::AuthUserDto;
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AuthenticatedUser, BearerToken};
use crate::outbound::http_support::{body_preview, join_path};

const USER_PATH: &str = "auth/v1/user";
const API_KEY_HEADER: &str = "apikey";

/// Errors raised while constructing [`SupabaseIdentityProvider`].
#[derive(Debug, thiserror::Error)]
pub enum SupabaseIdentityBuildError {
    #[error("invalid auth endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Identity adapter calling `GET {project_url}/auth/v1/user`.
pub struct SupabaseIdentityProvider {
    client: Client,
    endpoint: Url,
    anon_key: Zeroizing<String>,
}

impl std::fmt::Debug for SupabaseIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseIdentityProvider")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl SupabaseIdentityProvider {
    /// Build an adapter for the project at `project_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint cannot be derived or the reqwest
    /// client cannot be constructed.
    pub fn new(
        project_url: &Url,
        anon_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, SupabaseIdentityBuildError> {
        let endpoint = join_path(project_url, USER_PATH)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            anon_key,
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn resolve_user(
        &self,
        token: &BearerToken,
    ) -> Result<AuthenticatedUser, IdentityProviderError> {
        debug!(endpoint = %self.endpoint, "resolving bearer token");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(API_KEY_HEADER, self.anon_key.as_str())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(|error| IdentityProviderError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| IdentityProviderError::transport(error.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_user(body.as_ref())
    }
}

fn parse_user(body: &[u8]) -> Result<AuthenticatedUser, IdentityProviderError> {
    let decoded: AuthUserDto = serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid auth user JSON payload: {error}"))
    })?;
    decoded.into_domain().map_err(IdentityProviderError::decode)
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityProviderError::invalid_token(message)
        }
        _ => IdentityProviderError::transport(message),
    }
}

//! DTOs for the Supabase Auth `GET /auth/v1/user` response.

use serde::Deserialize;

use crate::domain::{AuthenticatedUser, UserId};

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl AuthUserDto {
    pub(super) fn into_domain(self) -> Result<AuthenticatedUser, String> {
        let id = UserId::new(&self.id).map_err(|err| format!("user id {:?}: {err}", self.id))?;
        let email = self.email.filter(|email| !email.trim().is_empty());
        Ok(AuthenticatedUser::new(id, email))
    }
}

//! Supabase Auth identity adapter.
//!
//! Implements the `IdentityProvider` port by asking the auth service who the
//! caller's access token belongs to.

mod dto;
mod http_source;

pub use http_source::{SupabaseIdentityBuildError, SupabaseIdentityProvider};

//! Outbound adapters implementing domain ports.
//!
//! - **openai**: chat-completion provider over reqwest
//! - **supabase**: bearer-token identity provider over reqwest
//! - **persistence**: PostgreSQL homework session store using Diesel
//! - **provider_config**: credentials for the above, read from the environment
//!
//! Adapters translate between domain types and wire or row formats and carry
//! no business rules.

pub(crate) mod http_support;
pub mod openai;
pub mod persistence;
pub mod provider_config;
pub mod supabase;

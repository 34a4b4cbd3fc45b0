//! HTTP inbound adapter exposing the REST endpoints.

pub mod bearer;
pub mod error;
pub mod health;
pub mod schemas;
pub mod solve;
pub mod state;

//! PostgreSQL persistence for homework sessions.
//!
//! Diesel row structs and table definitions stay private to this module;
//! callers see only the repository port and the pool.
//!
//! ```ignore
//! use homework_backend::outbound::persistence::{
//!     DbPool, DieselHomeworkSessionRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let sessions = DieselHomeworkSessionRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_homework_session_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_homework_session_repository::DieselHomeworkSessionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

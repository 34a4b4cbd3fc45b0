//! Port for homework session persistence.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use crate::domain::{HomeworkSession, NewHomeworkSession};

use super::define_port_error;

define_port_error! {
    /// Errors raised by homework session repository adapters.
    pub enum HomeworkSessionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "homework session repository connection failed: {message}",
        /// Insert failed during execution.
        Query { message: String } =>
            "homework session repository query failed: {message}",
    }
}

/// Port for storing solved homework sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HomeworkSessionRepository: Send + Sync {
    /// Insert one session and return the stored row, including the
    /// store-generated id and creation timestamp.
    async fn insert(
        &self,
        session: &NewHomeworkSession,
    ) -> Result<HomeworkSession, HomeworkSessionRepositoryError>;
}

/// Fixture repository that assigns ids without storing anything.
#[derive(Clone)]
pub struct FixtureHomeworkSessionRepository {
    clock: Arc<dyn Clock>,
}

impl FixtureHomeworkSessionRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for FixtureHomeworkSessionRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl std::fmt::Debug for FixtureHomeworkSessionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureHomeworkSessionRepository")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HomeworkSessionRepository for FixtureHomeworkSessionRepository {
    async fn insert(
        &self,
        session: &NewHomeworkSession,
    ) -> Result<HomeworkSession, HomeworkSessionRepositoryError> {
        Ok(HomeworkSession::from_new(
            session,
            Uuid::new_v4(),
            self.clock.utc(),
        ))
    }
}

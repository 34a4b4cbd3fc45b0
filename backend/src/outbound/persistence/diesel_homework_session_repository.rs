//! PostgreSQL-backed `HomeworkSessionRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{HomeworkSessionRow, NewHomeworkSessionRow};
use super::pool::DbPool;
use super::schema::homework_sessions;
use crate::domain::ports::{HomeworkSessionRepository, HomeworkSessionRepositoryError};
use crate::domain::{HomeworkSession, NewHomeworkSession};

/// Diesel-backed implementation of the homework session repository port.
#[derive(Debug, Clone)]
pub struct DieselHomeworkSessionRepository {
    pool: DbPool,
}

impl DieselHomeworkSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HomeworkSessionRepository for DieselHomeworkSessionRepository {
    async fn insert(
        &self,
        session: &NewHomeworkSession,
    ) -> Result<HomeworkSession, HomeworkSessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: HomeworkSessionRow = diesel::insert_into(homework_sessions::table)
            .values(NewHomeworkSessionRow::from(session))
            .returning(HomeworkSessionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(session_id = %row.id, user_id = %row.user_id, "homework session stored");
        Ok(row.into())
    }
}

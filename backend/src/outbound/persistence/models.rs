//! Row structs for `homework_sessions`. Internal to the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::homework_sessions;
use crate::domain::{HomeworkSession, NewHomeworkSession, UserId};

/// Insert payload. `id` and `created_at` come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = homework_sessions)]
pub(crate) struct NewHomeworkSessionRow<'a> {
    pub user_id: Uuid,
    pub question_text: Option<&'a str>,
    pub question_image_url: Option<&'a str>,
    pub solution: &'a str,
}

impl<'a> From<&'a NewHomeworkSession> for NewHomeworkSessionRow<'a> {
    fn from(session: &'a NewHomeworkSession) -> Self {
        Self {
            user_id: *session.user_id().as_uuid(),
            question_text: session.question_text(),
            question_image_url: session.question_image_url(),
            solution: session.solution().as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = homework_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HomeworkSessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question_text: Option<String>,
    pub question_image_url: Option<String>,
    pub solution: String,
    pub created_at: DateTime<Utc>,
}

impl From<HomeworkSessionRow> for HomeworkSession {
    fn from(row: HomeworkSessionRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            question_text: row.question_text,
            question_image_url: row.question_image_url,
            solution: row.solution,
            created_at: row.created_at,
        }
    }
}

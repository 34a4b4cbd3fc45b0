//! Driving port for the solve-homework use-case.
//!
//! Inbound adapters call this port with the caller's credential and the raw
//! question inputs; they never see identity, completion or storage
//! collaborators.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BearerToken, Error, Question};

/// Raw solve request as submitted by the client.
///
/// Both fields are optional; validation happens in the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveHomeworkRequest {
    /// Free-text question.
    pub question_text: Option<String>,
    /// Image reference: an `http(s)` URL or a `data:` URI.
    pub image_url: Option<String>,
}

/// Successful solve outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveHomeworkResponse {
    /// Generated step-by-step solution.
    pub solution: String,
    /// Identifier of the stored homework session.
    pub session_id: Uuid,
}

/// Domain use-case port for solving homework questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolveHomework: Send + Sync {
    /// Validate, authenticate, generate and persist one solution.
    async fn solve(
        &self,
        credentials: Option<BearerToken>,
        request: SolveHomeworkRequest,
    ) -> Result<SolveHomeworkResponse, Error>;
}

/// Canned solution returned by [`FixtureSolveHomework`].
pub const FIXTURE_SOLUTION: &str = "Step 1: Subtract 5 from both sides.\nStep 2: Divide by 2.\n\nSummary: x = 5";

/// Fixture implementation for HTTP tests that need no collaborators.
///
/// Validation and the credential check still apply so adapters observe the
/// same error codes as in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSolveHomework;

#[async_trait]
impl SolveHomework for FixtureSolveHomework {
    async fn solve(
        &self,
        credentials: Option<BearerToken>,
        request: SolveHomeworkRequest,
    ) -> Result<SolveHomeworkResponse, Error> {
        Question::try_from_parts(
            request.question_text.as_deref(),
            request.image_url.as_deref(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        if credentials.is_none() {
            return Err(Error::unauthorized("Unauthorized"));
        }
        Ok(SolveHomeworkResponse {
            solution: FIXTURE_SOLUTION.to_owned(),
            session_id: Uuid::new_v4(),
        })
    }
}

//! Solve-homework domain service.
//!
//! Implements the [`SolveHomework`] driving port. Each request runs strictly
//! in order: validate the question, authenticate the caller, build the
//! prompt, request one completion, extract the solution, then store the
//! session. A failing step stops the pipeline; later collaborators are never
//! called.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CompletionProvider, CompletionProviderError, HomeworkSessionRepository,
    HomeworkSessionRepositoryError, IdentityProvider, IdentityProviderError, SolveHomework,
    SolveHomeworkRequest, SolveHomeworkResponse,
};
use crate::domain::{
    AuthenticatedUser, BearerToken, CompletionRequest, Error, NewHomeworkSession, Question,
    Solution,
};

const UNAUTHORIZED: &str = "Unauthorized";
const API_KEY_MISSING: &str = "OpenAI API key not configured";
const PERSISTENCE_FAILED: &str = "Failed to save homework session";

fn map_identity_error(error: IdentityProviderError) -> Error {
    match &error {
        IdentityProviderError::InvalidToken { .. } => {
            info!(reason = %error, "bearer token rejected");
        }
        IdentityProviderError::Transport { .. } | IdentityProviderError::Decode { .. } => {
            warn!(reason = %error, "identity provider failed; treating caller as unauthenticated");
        }
    }
    Error::unauthorized(UNAUTHORIZED)
}

fn map_completion_error(error: CompletionProviderError) -> Error {
    error!(reason = %error, "completion request failed");
    match error {
        CompletionProviderError::NotConfigured => Error::configuration(API_KEY_MISSING),
        CompletionProviderError::Rejected { message, .. } => Error::upstream(message),
        CompletionProviderError::Transport { .. } => Error::upstream("OpenAI API error"),
        CompletionProviderError::Timeout { .. } => {
            Error::upstream("OpenAI API request timed out")
        }
        CompletionProviderError::Decode { .. } => {
            Error::malformed_upstream_response("OpenAI API returned an unreadable response")
        }
    }
}

fn map_repository_error(error: &HomeworkSessionRepositoryError) -> Error {
    match error {
        HomeworkSessionRepositoryError::Connection { .. }
        | HomeworkSessionRepositoryError::Query { .. } => Error::persistence(PERSISTENCE_FAILED),
    }
}

/// Service implementing [`SolveHomework`] over three driven ports.
///
/// Collaborators may be concrete adapters or trait objects such as
/// `dyn IdentityProvider`.
pub struct SolveHomeworkService<I: ?Sized, C: ?Sized, R: ?Sized> {
    identity: Arc<I>,
    completions: Arc<C>,
    sessions: Arc<R>,
}

impl<I: ?Sized, C: ?Sized, R: ?Sized> Clone for SolveHomeworkService<I, C, R> {
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
            completions: Arc::clone(&self.completions),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<I: ?Sized, C: ?Sized, R: ?Sized> SolveHomeworkService<I, C, R> {
    /// Create a service from its collaborators.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use homework_backend::domain::SolveHomeworkService;
    /// # use homework_backend::domain::ports::{
    /// #     FixtureHomeworkSessionRepository, FixtureIdentityProvider,
    /// #     UnconfiguredCompletionProvider,
    /// # };
    /// let service = SolveHomeworkService::new(
    ///     Arc::new(FixtureIdentityProvider),
    ///     Arc::new(UnconfiguredCompletionProvider),
    ///     Arc::new(FixtureHomeworkSessionRepository::default()),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(identity: Arc<I>, completions: Arc<C>, sessions: Arc<R>) -> Self {
        Self {
            identity,
            completions,
            sessions,
        }
    }
}

impl<I, C, R> SolveHomeworkService<I, C, R>
where
    I: IdentityProvider + ?Sized,
    C: CompletionProvider + ?Sized,
    R: HomeworkSessionRepository + ?Sized,
{
    async fn authenticate(
        &self,
        credentials: Option<BearerToken>,
    ) -> Result<AuthenticatedUser, Error> {
        let Some(token) = credentials else {
            info!("solve request without bearer token");
            return Err(Error::unauthorized(UNAUTHORIZED));
        };
        self.identity
            .resolve_user(&token)
            .await
            .map_err(map_identity_error)
    }

    async fn generate(&self, question: &Question) -> Result<Solution, Error> {
        let request = CompletionRequest::for_question(question);
        let completion = self
            .completions
            .complete(&request)
            .await
            .map_err(map_completion_error)?;
        completion
            .content
            .and_then(|text| Solution::new(text).ok())
            .ok_or_else(|| {
                error!("completion response carried no solution text");
                Error::malformed_upstream_response("OpenAI API returned no completion")
            })
    }
}

#[async_trait]
impl<I, C, R> SolveHomework for SolveHomeworkService<I, C, R>
where
    I: IdentityProvider + ?Sized,
    C: CompletionProvider + ?Sized,
    R: HomeworkSessionRepository + ?Sized,
{
    async fn solve(
        &self,
        credentials: Option<BearerToken>,
        request: SolveHomeworkRequest,
    ) -> Result<SolveHomeworkResponse, Error> {
        let question = Question::try_from_parts(
            request.question_text.as_deref(),
            request.image_url.as_deref(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        let user = self.authenticate(credentials).await?;
        info!(user_id = %user.id(), "user authenticated");

        let solution = self.generate(&question).await?;
        info!(solution_len = solution.as_str().len(), "completion received");

        let new_session = NewHomeworkSession::new(*user.id(), question, solution);
        let stored = self.sessions.insert(&new_session).await.map_err(|err| {
            error!(
                reason = %err,
                user_id = %new_session.user_id(),
                solution_len = new_session.solution().as_str().len(),
                "homework session not saved; generated solution discarded"
            );
            map_repository_error(&err)
        })?;
        info!(session_id = %stored.id, "homework session saved");

        Ok(SolveHomeworkResponse {
            solution: stored.solution,
            session_id: stored.id,
        })
    }
}

#[cfg(test)]
#[path = "solve_service_tests.rs"]
mod tests;

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureSolveHomework, SolveHomework};
use crate::inbound::http::error::ErrorStatusPolicy;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub solver: Arc<dyn SolveHomework>,
    pub error_policy: ErrorStatusPolicy,
}

impl HttpState {
    /// Build state around a solver using per-kind error statuses.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use homework_backend::domain::ports::FixtureSolveHomework;
    /// use homework_backend::inbound::http::error::ErrorStatusPolicy;
    /// use homework_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureSolveHomework))
    ///     .with_error_policy(ErrorStatusPolicy::Uniform);
    /// assert_eq!(state.error_policy, ErrorStatusPolicy::Uniform);
    /// ```
    pub fn new(solver: Arc<dyn SolveHomework>) -> Self {
        Self {
            solver,
            error_policy: ErrorStatusPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_error_policy(mut self, error_policy: ErrorStatusPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureSolveHomework))
    }
}

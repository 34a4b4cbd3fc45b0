//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON envelopes. The
//! status is chosen per error code by default; deployments whose clients
//! expect the legacy behaviour can switch to a uniform 500 through
//! [`ErrorStatusPolicy::Uniform`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::UpstreamError | ErrorCode::MalformedUpstreamResponse => {
            StatusCode::BAD_GATEWAY
        }
        ErrorCode::ConfigurationError
        | ErrorCode::PersistenceError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(ErrorCode::InternalError.default_message());
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

/// How failure statuses are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStatusPolicy {
    /// Status follows the error code (400, 401, 500 or 502).
    #[default]
    PerKind,
    /// Every failure is answered with 500.
    Uniform,
}

impl ErrorStatusPolicy {
    /// Build the policy from the uniform-status switch.
    pub fn from_uniform_flag(uniform: bool) -> Self {
        if uniform { Self::Uniform } else { Self::PerKind }
    }

    /// Status used for `error` under this policy.
    pub fn status_for(self, error: &Error) -> StatusCode {
        match self {
            Self::PerKind => status_for(error.code()),
            Self::Uniform => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render `error` as a JSON envelope under this policy.
    ///
    /// # Examples
    /// ```
    /// use actix_web::http::StatusCode;
    /// use homework_backend::domain::Error;
    /// use homework_backend::inbound::http::error::ErrorStatusPolicy;
    ///
    /// let err = Error::unauthorized("Unauthorized");
    /// assert_eq!(ErrorStatusPolicy::PerKind.respond(&err).status(), StatusCode::UNAUTHORIZED);
    /// assert_eq!(
    ///     ErrorStatusPolicy::Uniform.respond(&err).status(),
    ///     StatusCode::INTERNAL_SERVER_ERROR
    /// );
    /// ```
    pub fn respond(self, error: &Error) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_for(error));
        if let Some(id) = error.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(error))
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        ErrorStatusPolicy::PerKind.respond(self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(ErrorCode::InternalError.default_message())
    }
}

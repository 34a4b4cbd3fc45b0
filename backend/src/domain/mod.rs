//! Domain primitives, ports and the solve-homework use-case.
//!
//! Purpose: define strongly typed entities shared by inbound and outbound
//! adapters, and the service that orchestrates a solve request. Nothing in
//! this module knows about HTTP, SQL or a specific LLM vendor.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Question: validated text/image homework question.
//! - CompletionRequest and friends: provider-neutral prompt.
//! - NewHomeworkSession / HomeworkSession: persisted solve record.
//! - SolveHomeworkService: implementation of the driving port.

pub mod auth;
pub mod error;
pub mod homework_session;
pub mod ports;
pub mod prompt;
pub mod question;
pub mod solve_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{BearerToken, BearerTokenError};
pub use self::error::{Error, ErrorCode};
pub use self::homework_session::{
    EmptySolutionError, HomeworkSession, NewHomeworkSession, Solution,
};
pub use self::prompt::{
    ChatMessage, ChatRole, CompletionRequest, CompletionSettings, ContentPart, MessageContent,
    SYSTEM_PROMPT, build_messages,
};
pub use self::question::{Question, QuestionValidationError};
pub use self::solve_service::SolveHomeworkService;
pub use self::trace_id::TraceId;
pub use self::user::{AuthenticatedUser, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use homework_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("Unauthorized"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

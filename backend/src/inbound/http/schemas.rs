//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their serialised shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// No usable question, or the body is not valid JSON.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Bearer token missing, invalid or expired.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// A provider credential is missing on the server.
    #[schema(rename = "configuration_error")]
    ConfigurationError,
    /// The LLM provider failed or rejected the request.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// The LLM provider answered without a completion.
    #[schema(rename = "malformed_upstream_response")]
    MalformedUpstreamResponse,
    /// The homework session could not be stored.
    #[schema(rename = "persistence_error")]
    PersistenceError,
    /// Unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`], the JSON error envelope.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message, displayed verbatim by clients.
    #[schema(example = "No question provided")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

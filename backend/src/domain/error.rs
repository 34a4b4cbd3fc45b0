//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the serialised form doubles as the JSON error envelope, so the
//! human-readable message lives under the `error` key that existing clients
//! already display verbatim.

use serde::{Deserialize, Serialize};

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request carries no usable question or is malformed.
    InvalidRequest,
    /// The bearer credential is missing, invalid or expired.
    Unauthorized,
    /// A provider credential required to serve the request is missing.
    ConfigurationError,
    /// The LLM provider call failed or was rejected.
    UpstreamError,
    /// The LLM provider answered without a usable completion.
    MalformedUpstreamResponse,
    /// The homework session could not be stored.
    PersistenceError,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Unauthorized => "Unauthorized",
            Self::ConfigurationError => "Service is not configured",
            Self::UpstreamError => "OpenAI API error",
            Self::MalformedUpstreamResponse => "OpenAI API returned no completion",
            Self::PersistenceError => "Failed to save homework session",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is never blank; blank input falls back to
///   [`ErrorCode::default_message`].
/// - `trace_id` is captured from the task-local [`TraceId`] when the error is
///   constructed inside a traced request.
///
/// # Examples
/// ```
/// use homework_backend::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::Unauthorized, "Unauthorized");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// assert_eq!(err.message(), "Unauthorized");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    #[serde(rename = "error")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, correlated with the current trace when in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, if one was captured or attached.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a trace identifier to the error.
    ///
    /// # Examples
    /// ```
    /// use homework_backend::domain::Error;
    ///
    /// let err = Error::invalid_request("bad").with_trace_id("abc");
    /// assert_eq!(err.trace_id(), Some("abc"));
    /// ```
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::ConfigurationError`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationError, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamError`].
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, message)
    }

    /// Convenience constructor for [`ErrorCode::MalformedUpstreamResponse`].
    pub fn malformed_upstream_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedUpstreamResponse, message)
    }

    /// Convenience constructor for [`ErrorCode::PersistenceError`].
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceError, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Tests for envelope serialisation and trace id capture.

    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(ErrorCode::InvalidRequest)]
    #[case(ErrorCode::UpstreamError)]
    #[case(ErrorCode::PersistenceError)]
    fn blank_messages_fall_back_to_code_default(#[case] code: ErrorCode) {
        let err = Error::new(code, "   ");
        assert_eq!(err.message(), code.default_message());
    }

    #[rstest]
    fn envelope_keeps_error_key_for_message() {
        let err = Error::upstream("Incorrect API key provided").with_trace_id("abc");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(
            value,
            json!({
                "code": "upstream_error",
                "error": "Incorrect API key provided",
                "traceId": "abc",
            })
        );
    }

    #[rstest]
    fn envelope_omits_missing_trace_id() {
        let value = serde_json::to_value(Error::unauthorized("Unauthorized"))
            .expect("serialise error");
        assert!(value.get("traceId").is_none());
        assert_eq!(value.get("error").and_then(Value::as_str), Some("Unauthorized"));
    }

    #[rstest]
    fn new_returns_none_when_trace_id_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[tokio::test]
    async fn new_captures_trace_id_in_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let error = TraceId::scope(trace_id, async { Error::persistence("db down") }).await;
        assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-000000000000"));
    }
}

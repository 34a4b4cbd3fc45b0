//! Request-scoped trace identifier for correlation across logs and errors.
//!
//! The identifier lives in Tokio task-local storage so domain errors can pick
//! it up without threading it through every call. Task locals are not
//! inherited by spawned tasks; wrap spawned work in [`TraceId::scope`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use homework_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let observed = TraceId::scope(trace_id, async { TraceId::current() }).await;
/// assert_eq!(observed, Some(trace_id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the identifier of the enclosing traced request, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` installed as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

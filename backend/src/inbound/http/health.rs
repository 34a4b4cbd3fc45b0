//! Liveness and readiness probes for orchestrators and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Shared probe state.
///
/// Starts live but not ready; the server marks itself ready once the
/// listener is bound and flips liveness off while draining.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Probe body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    /// `ok` or `unavailable`.
    #[schema(example = "ok")]
    pub status: String,
}

fn probe_response(probe_ok: bool) -> HttpResponse {
    let (mut builder, status) = if probe_ok {
        (HttpResponse::Ok(), "ok")
    } else {
        (HttpResponse::ServiceUnavailable(), "unavailable")
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody {
            status: status.to_owned(),
        })
}

/// Readiness probe: 200 once the server accepts traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = ProbeBody),
        (status = 503, description = "Server is not ready", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive", body = ProbeBody),
        (status = 503, description = "Server is shutting down", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

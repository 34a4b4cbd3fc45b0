//! Solve-homework HTTP handler.
//!
//! ```text
//! POST /api/v1/solve-homework
//! Authorization: Bearer <token>
//! {"questionText": "...", "imageUrl": "..."}
//! ```
//!
//! The body is read and decoded here rather than through `web::Json` or
//! `web::Bytes` so that a malformed or oversized body produces the same JSON
//! envelope, status policy and CORS headers as every other failure.

use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error};
use crate::domain::ports::{SolveHomeworkRequest, SolveHomeworkResponse};
use crate::inbound::http::bearer::BearerCredentials;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Largest accepted request body.
///
/// Clients upload images of up to 10 MB as base64 `data:` URIs, which grow
/// by a third once encoded.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Request payload for solving a homework question.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolveHomeworkRequestBody {
    /// Question text. Empty or blank counts as absent.
    #[serde(default)]
    #[schema(example = "Solve for x: 2x + 5 = 15")]
    pub question_text: Option<String>,
    /// Image reference: an `http(s)` URL or a `data:` URI.
    #[serde(default)]
    #[schema(example = "data:image/png;base64,iVBORw0KGgo...")]
    pub image_url: Option<String>,
}

impl From<SolveHomeworkRequestBody> for SolveHomeworkRequest {
    fn from(body: SolveHomeworkRequestBody) -> Self {
        Self {
            question_text: body.question_text,
            image_url: body.image_url,
        }
    }
}

/// Response payload for a solved question.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolveHomeworkResponseBody {
    /// Step-by-step solution text.
    pub solution: String,
    /// Identifier of the stored homework session.
    #[schema(format = "uuid")]
    pub session_id: String,
}

impl From<SolveHomeworkResponse> for SolveHomeworkResponseBody {
    fn from(response: SolveHomeworkResponse) -> Self {
        Self {
            solution: response.solution,
            session_id: response.session_id.to_string(),
        }
    }
}

async fn read_body(mut payload: web::Payload) -> ApiResult<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            debug!(reason = %err, "solve request body could not be read");
            Error::invalid_request("Request body could not be read")
        })?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            debug!(limit = MAX_BODY_BYTES, "rejecting oversized solve request body");
            return Err(Error::invalid_request("Request body is too large"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn parse_body(body: &[u8]) -> ApiResult<SolveHomeworkRequestBody> {
    serde_json::from_slice(body).map_err(|err| {
        debug!(reason = %err, "rejecting undecodable solve request body");
        Error::invalid_request("Request body must be a JSON object")
    })
}

/// Solve a homework question and store the session.
#[utoipa::path(
    post,
    path = "/api/v1/solve-homework",
    request_body = SolveHomeworkRequestBody,
    responses(
        (status = 200, description = "Solution generated and stored", body = SolveHomeworkResponseBody),
        (status = 400, description = "No question provided, malformed or oversized body", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Configuration or storage failure", body = ErrorSchema),
        (status = 502, description = "LLM provider failure", body = ErrorSchema)
    ),
    tags = ["homework"],
    operation_id = "solveHomework",
    security(("BearerAuth" = []))
)]
#[post("/solve-homework")]
pub async fn solve_homework(
    state: web::Data<HttpState>,
    credentials: BearerCredentials,
    payload: web::Payload,
) -> HttpResponse {
    let policy = state.error_policy;
    let request = match read_body(payload).await.and_then(|body| parse_body(&body)) {
        Ok(request) => request,
        Err(err) => return policy.respond(&err),
    };
    match state
        .solver
        .solve(credentials.into_inner(), request.into())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(SolveHomeworkResponseBody::from(response)),
        Err(err) => policy.respond(&err),
    }
}

#[cfg(test)]
#[path = "solve_tests.rs"]
mod tests;

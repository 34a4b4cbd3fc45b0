//! Tests for the solve-homework HTTP handler.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{FIXTURE_SOLUTION, FixtureSolveHomework, MockSolveHomework};
use crate::domain::{BearerToken, Error};
use crate::inbound::http::error::ErrorStatusPolicy;
use crate::{Cors, Trace};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<actix_web::body::BoxBody>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Cors)
        .wrap(Trace)
        .service(web::scope("/api/v1").service(solve_homework))
}

fn post(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/solve-homework")
        .insert_header((AUTHORIZATION, "Bearer fixture-token"))
        .set_json(body)
}

#[actix_web::test]
async fn returns_solution_and_session_id() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let res = actix_test::call_service(
        &app,
        post(json!({"questionText": "Solve for x: 2x+5=15"})).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-origin"));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["solution"], FIXTURE_SOLUTION);
    let session_id = body["sessionId"].as_str().expect("session id string");
    assert!(Uuid::parse_str(session_id).is_ok());
}

#[actix_web::test]
async fn forwards_token_and_inputs_to_solver() {
    let mut solver = MockSolveHomework::new();
    solver
        .expect_solve()
        .times(1)
        .withf(|credentials, request| {
            credentials.as_ref().map(BearerToken::expose) == Some("abc.def")
                && request.question_text.is_none()
                && request.image_url.as_deref() == Some("https://img.test/q.png")
        })
        .return_once(|_, _| {
            Ok(SolveHomeworkResponse {
                solution: "See diagram".into(),
                session_id: Uuid::nil(),
            })
        });
    let app =
        actix_test::init_service(test_app(HttpState::new(Arc::new(solver)))).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/solve-homework")
        .insert_header((AUTHORIZATION, "Bearer abc.def"))
        .set_json(json!({"imageUrl": "https://img.test/q.png"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["sessionId"], Uuid::nil().to_string());
}

#[actix_web::test]
async fn empty_question_is_bad_request_with_cors_headers() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let res = actix_test::call_service(
        &app,
        post(json!({"questionText": "", "imageUrl": ""})).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key("access-control-allow-origin"));
    let trace_id = res
        .headers()
        .get("trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "No question provided");
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["traceId"], trace_id);
}

#[rstest]
#[case(b"not json".as_slice())]
#[case(b"".as_slice())]
#[case(br#"{"questionText": 42}"#.as_slice())]
#[actix_web::test]
async fn undecodable_body_is_bad_request(#[case] payload: &'static [u8]) {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/solve-homework")
        .insert_header((AUTHORIZATION, "Bearer fixture-token"))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

fn inline_image(encoded_len: usize) -> String {
    format!("data:image/png;base64,{}", "A".repeat(encoded_len))
}

#[actix_web::test]
async fn encoded_ten_megabyte_image_is_accepted() {
    let mut solver = MockSolveHomework::new();
    solver
        .expect_solve()
        .times(1)
        .withf(|_, request| {
            request
                .image_url
                .as_ref()
                .is_some_and(|url| url.len() > 14 * 1024 * 1024)
        })
        .return_once(|_, _| {
            Ok(SolveHomeworkResponse {
                solution: "Labelled diagram".into(),
                session_id: Uuid::nil(),
            })
        });
    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(solver)))).await;
    let image = inline_image(14 * 1024 * 1024);
    let res = actix_test::call_service(&app, post(json!({"imageUrl": image})).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn oversized_body_is_rejected_with_error_envelope() {
    let mut solver = MockSolveHomework::new();
    solver.expect_solve().times(0);
    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(solver)))).await;
    let image = inline_image(MAX_BODY_BYTES);
    let res = actix_test::call_service(&app, post(json!({"imageUrl": image})).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key("access-control-allow-origin"));
    assert_eq!(
        res.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["error"], "Request body is too large");
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/solve-homework")
        .set_json(json!({"questionText": "2+2?"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[rstest]
#[case(Error::unauthorized("Unauthorized"), StatusCode::UNAUTHORIZED)]
#[case(Error::upstream("Incorrect API key provided"), StatusCode::BAD_GATEWAY)]
#[case(
    Error::persistence("Failed to save homework session"),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[actix_web::test]
async fn solver_errors_use_per_kind_status(#[case] error: Error, #[case] expected: StatusCode) {
    let mut solver = MockSolveHomework::new();
    let message = error.message().to_owned();
    solver.expect_solve().return_once(move |_, _| Err(error));
    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(solver)))).await;
    let res = actix_test::call_service(&app, post(json!({"questionText": "q"})).to_request()).await;

    assert_eq!(res.status(), expected);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], message);
}

#[actix_web::test]
async fn uniform_policy_answers_500() {
    let state = HttpState::default().with_error_policy(ErrorStatusPolicy::Uniform);
    let app = actix_test::init_service(test_app(state)).await;
    let res = actix_test::call_service(&app, post(json!({})).to_request()).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "No question provided");
}

#[actix_web::test]
async fn preflight_skips_handler() {
    let mut solver = MockSolveHomework::new();
    solver.expect_solve().times(0);
    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(solver)))).await;
    let req = actix_test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/v1/solve-homework")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-headers"));
    assert!(res.headers().contains_key("trace-id"));
    let body = actix_test::read_body(res).await;
    assert!(body.is_empty());
}

#[rstest]
fn fixture_state_uses_fixture_solver() {
    let state = HttpState::new(Arc::new(FixtureSolveHomework));
    assert_eq!(state.error_policy, ErrorStatusPolicy::PerKind);
}

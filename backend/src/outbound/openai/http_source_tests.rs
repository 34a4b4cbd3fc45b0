//! Tests for the chat-completion adapter.

use std::time::Duration;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::{Question, SYSTEM_PROMPT};
use crate::outbound::http_support::stub_server::{StubServer, closed_port_url};

const TIMEOUT: Duration = Duration::from_secs(5);

fn request_for(text: Option<&str>, image: Option<&str>) -> CompletionRequest {
    let question = Question::try_from_parts(text, image).expect("valid question");
    CompletionRequest::for_question(&question)
}

fn source(base_url: &Url) -> OpenAiCompletionSource {
    OpenAiCompletionSource::new(base_url, Zeroizing::new("sk-test".to_owned()), TIMEOUT)
        .expect("adapter builds")
}

#[rstest]
fn text_only_payload_uses_plain_string_content() {
    let request = request_for(Some("Solve for x: 2x+5=15"), None);
    let value = serde_json::to_value(ChatCompletionRequestDto::from(&request)).expect("encode");
    assert_eq!(
        value,
        json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": "Please solve this homework problem: Solve for x: 2x+5=15"},
            ],
            "max_tokens": 1500,
            "temperature": 0.7,
        })
    );
}

#[rstest]
fn image_payloads_use_typed_parts() {
    let request = request_for(Some("Label it"), Some("data:image/png;base64,AAAA"));
    let value = serde_json::to_value(ChatCompletionRequestDto::from(&request)).expect("encode");
    assert_eq!(
        value["messages"][1]["content"],
        json!([
            {
                "type": "text",
                "text": "Please solve this homework problem. Here's the question text: \"Label it\" and I've also included an image.",
            },
            {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}},
        ])
    );
}

#[rstest]
#[case(r#"{"choices":[{"message":{"role":"assistant","content":"x = 5"}}]}"#, Some("x = 5"))]
#[case(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#, None)]
#[case(r#"{"choices":[]}"#, None)]
#[case(r#"{"id":"chatcmpl-1"}"#, None)]
fn parses_first_choice(#[case] body: &str, #[case] expected: Option<&str>) {
    let completion = parse_completion(body.as_bytes()).expect("decodes");
    assert_eq!(completion.content.as_deref(), expected);
}

#[rstest]
fn non_json_success_body_is_decode_error() {
    let error = parse_completion(b"<html>gateway</html>").expect_err("not JSON");
    assert!(matches!(error, CompletionProviderError::Decode { .. }));
}

#[rstest]
#[case(
    StatusCode::UNAUTHORIZED,
    r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
    "Incorrect API key provided"
)]
#[case(
    StatusCode::TOO_MANY_REQUESTS,
    r#"{"error":{"message":"Rate limit reached"}}"#,
    "Rate limit reached"
)]
#[case(
    StatusCode::BAD_GATEWAY,
    "upstream\n  unavailable",
    "OpenAI API error (status 502): upstream unavailable"
)]
#[case(StatusCode::INTERNAL_SERVER_ERROR, "", "OpenAI API error (status 500)")]
fn status_errors_prefer_provider_message(
    #[case] status: StatusCode,
    #[case] body: &str,
    #[case] expected: &str,
) {
    let error = map_status_error(status, body.as_bytes());
    assert_eq!(
        error,
        CompletionProviderError::Rejected {
            status: status.as_u16(),
            message: expected.to_owned(),
        }
    );
}

#[rstest]
fn endpoint_is_derived_from_base_url() {
    let base = Url::parse("https://api.openai.com").expect("url");
    assert_eq!(
        source(&base).endpoint().as_str(),
        "https://api.openai.com/v1/chat/completions"
    );
}

#[actix_web::test]
async fn posts_authenticated_json_and_returns_content() {
    let stub = StubServer::start(
        200,
        r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Step 1: x = 5"}}]}"#,
    );
    let completion = source(&stub.base_url)
        .complete(&request_for(Some("2x+5=15"), None))
        .await
        .expect("completion succeeds");
    assert_eq!(completion.content.as_deref(), Some("Step 1: x = 5"));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let recorded = requests.first().expect("one request");
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/v1/chat/completions");
    assert_eq!(recorded.header("authorization"), Some("Bearer sk-test"));
    assert_eq!(recorded.header("content-type"), Some("application/json"));
    assert_eq!(recorded.json()["model"], "gpt-4o");
    stub.stop().await;
}

#[actix_web::test]
async fn rejected_call_surfaces_provider_message() {
    let stub = StubServer::start(
        401,
        r#"{"error":{"message":"Incorrect API key provided"}}"#,
    );
    let error = source(&stub.base_url)
        .complete(&request_for(Some("2+2?"), None))
        .await
        .expect_err("rejected");
    assert_eq!(
        error,
        CompletionProviderError::rejected(401_u16, "Incorrect API key provided")
    );
    stub.stop().await;
}

#[actix_web::test]
async fn unreachable_provider_is_transport_error() {
    let error = source(&closed_port_url())
        .complete(&request_for(Some("2+2?"), None))
        .await
        .expect_err("connection refused");
    assert!(matches!(error, CompletionProviderError::Transport { .. }));
}

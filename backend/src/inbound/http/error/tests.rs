//! Tests for mapping domain errors onto HTTP responses.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("boom")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }))
}

#[fixture]
fn conflict_case() -> Error {
    Error::conflict("taken")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "email": "test@test.com" }))
}

async fn body_of(response: HttpResponse) -> Error {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Conflict, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::NotFound, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn domain_failures_stay_client_errors(#[case] code: ErrorCode, #[case] expected: StatusCode) {
    assert_eq!(status_for(code), expected);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_code_and_details(conflict_case: Error) {
    let response = conflict_case.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );

    let payload = body_of(response).await;
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.message(), "taken");
    assert_eq!(payload.details(), Some(&json!({ "email": "test@test.com" })));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error_case: Error) {
    let response = internal_error_case.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let payload = body_of(response).await;
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let response = Error::not_found("missing").error_response();
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert!(err.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn json_error_handler_produces_invalid_request_envelope() {
    let req = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &req);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = body_of(response).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        payload
            .details()
            .and_then(|details| details.get("code"))
            .and_then(|code| code.as_str()),
        Some("invalid_body")
    );
}

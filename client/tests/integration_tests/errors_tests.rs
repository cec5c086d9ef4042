//! Integration tests for response status handling.
//!
//! Tests cover:
//! - 401 and 422 mapped to their dedicated errors
//! - Any other non-2xx status reported as an API error
//! - Response bodies kept on the error

use http::{Method, StatusCode};
use signal_client::{Client, ClientError, Context};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{client_for, mock_server, signal};

async fn send_with_status(status: u16) -> Result<(), ClientError> {
    let server = mock_server("/signals", status).await;
    let client = client_for(&server);
    client
        .signal_service()
        .send_signal(&Context::background(), &signal("point", "a", "schema", "a"))
        .await
}

#[tokio::test]
async fn test_success_statuses() {
    for status in [200, 201, 202, 204] {
        assert!(send_with_status(status).await.is_ok(), "status {status}");
    }
}

#[tokio::test]
async fn test_unauthorized_is_auth_token_error() {
    let err = send_with_status(401).await.unwrap_err();
    assert!(matches!(err, ClientError::AuthToken(_)));
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_unprocessable_is_invalid_signal_error() {
    let err = send_with_status(422).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidSignal(_)));
    assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
}

#[tokio::test]
async fn test_other_statuses_are_api_errors() {
    for status in [301, 400, 403, 404, 500, 502] {
        let err = send_with_status(status).await.unwrap_err();
        assert!(matches!(err, ClientError::Api(_)), "status {status}");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
    }
}

#[tokio::test]
async fn test_error_keeps_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signals"))
        .respond_with(ResponseTemplate::new(422).set_body_string("{\"error\":\"bad schema\"}"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .signal_service()
        .send_signal(&Context::background(), &signal("point", "a", "schema", "a"))
        .await
        .unwrap_err();

    let response = err.response().unwrap();
    assert_eq!(response.body, b"{\"error\":\"bad schema\"}");
    assert!(err.to_string().contains("signal is invalid"));
}

#[tokio::test]
async fn test_successful_response_body_is_drained() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signals"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ignored".repeat(1024)))
        .expect(2)
        .mount(&server)
        .await;
    let client = client_for(&server);
    let service = client.signal_service();
    let sent = signal("point", "a", "schema", "a");

    service.send_signal(&Context::background(), &sent).await.unwrap();
    service.send_signal(&Context::background(), &sent).await.unwrap();
}

#[tokio::test]
async fn test_failed_calls_leave_client_usable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signals"))
        .respond_with(ResponseTemplate::new(422).set_body_string("rejected".repeat(512)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json ".repeat(512)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/signals"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let sent = signal("point", "a", "schema", "a");

    let err = client
        .signal_service()
        .send_signal(&ctx, &sent)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidSignal(_)));
    assert_eq!(err.response().unwrap().body.len(), "rejected".len() * 512);

    let request = client
        .new_request::<()>(Method::GET, "status", None)
        .unwrap();
    let err = client
        .execute_json::<serde_json::Value>(&ctx, request)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));

    client
        .signal_service()
        .send_signal(&ctx, &sent)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(None, "")
        .with_base_url(&format!("http://{addr}/"))
        .unwrap();

    let err = client
        .signal_service()
        .send_signal(&Context::background(), &signal("point", "a", "schema", "a"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_deadline_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signals"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .signal_service()
        .send_signal(
            &Context::with_timeout(Duration::from_millis(50)),
            &signal("point", "a", "schema", "a"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::DeadlineExceeded));
    assert!(err.is_context_error());
}

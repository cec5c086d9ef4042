//! Integration tests for the debug logger.

use signal_client::{Context, DebugLogger};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{client_for, signal, CapturedLogs};

#[tokio::test]
async fn test_logger_receives_request_and_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signals"))
        .respond_with(ResponseTemplate::new(202).set_body_string("accepted"))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let logger: Arc<dyn DebugLogger> = Arc::new(logs.clone());
    let client = client_for(&server).with_logger(logger);

    client
        .signal_service()
        .send_signal(&Context::background(), &signal("point", "a", "my schema", "hi"))
        .await
        .unwrap();

    let messages = logs.messages();
    assert_eq!(messages.len(), 2);

    let request = &messages[0];
    assert!(request.starts_with("sending request\nPOST /signals "));
    assert!(request.contains("x-session-key: \r\n"));
    assert!(request.contains("content-type: application/json\r\n"));
    assert!(request.contains("\"payload_schema\":\"my schema\""));

    let response = &messages[1];
    assert!(response.starts_with("received response\n"));
    assert!(response.contains("202 Accepted"));
    assert!(response.contains("accepted"));
}

#[tokio::test]
async fn test_logger_receives_failed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signals"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let client = client_for(&server).with_logger(Arc::new(logs.clone()));

    let result = client
        .signal_service()
        .send_signal(&Context::background(), &signal("point", "a", "schema", "a"))
        .await;

    assert!(result.is_err());
    let messages = logs.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].contains("401 Unauthorized"));
}

#[tokio::test]
async fn test_no_logging_when_rejected_early() {
    let server = MockServer::start().await;
    let logs = CapturedLogs::default();
    let client = client_for(&server).with_logger(Arc::new(logs.clone()));

    let _ = client.signal_service().send_signal(&Context::background(), None).await;
    let _ = client
        .signal_service()
        .send_signal(None, &signal("point", "a", "schema", "a"))
        .await;

    assert!(logs.messages().is_empty());
}

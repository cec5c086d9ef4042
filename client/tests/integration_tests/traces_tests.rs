//! Integration tests for `POST /traces`.

use signal_client::models::Trace;
use signal_client::{ClientError, Context};

use super::common::{client_for, mock_server, signal, single_request};

fn two_signal_trace() -> Trace {
    Trace::from_signals(vec![
        signal("my type 1", "my signal 1", "my schema 1", "hello signal 1").with_source("agent"),
        signal("my type 2", "my signal 2", "my schema 2", "hello signal 2").with_source("agent"),
    ])
}

#[tokio::test]
async fn test_send_trace() {
    let server = mock_server("/traces", 200).await;
    let client = client_for(&server);
    let sent = two_signal_trace();

    client
        .signal_service()
        .send_trace(&Context::background(), &sent)
        .await
        .unwrap();

    let request = single_request(&server).await;
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(request.url.path(), "/traces");

    let received: Trace = request.body_json().unwrap();
    assert_eq!(received, sent);
}

#[tokio::test]
async fn test_send_trace_keeps_children_separate() {
    let server = mock_server("/traces", 200).await;
    let client = client_for(&server);
    let trace = Trace::new(signal("point", "my trace", "trace schema", "hello trace"))
        .with_signal(signal("point", "child", "child schema", "hello child"));

    client
        .signal_service()
        .send_trace(&Context::background(), &trace)
        .await
        .unwrap();

    let json: serde_json::Value = single_request(&server).await.body_json().unwrap();
    assert_eq!(json["signal_name"], "my trace");
    assert_eq!(json["payload_schema"], "trace schema");
    assert_eq!(json["data"][0]["signal_name"], "child");
    assert_eq!(json["data"][0]["payload_schema"], "child schema");
}

#[tokio::test]
async fn test_send_trace_without_context() {
    let server = mock_server("/traces", 200).await;
    let client = client_for(&server);

    let result = client
        .signal_service()
        .send_trace(None, &two_signal_trace())
        .await;

    assert!(matches!(result, Err(ClientError::InvalidContext)));
}

#[tokio::test]
async fn test_send_trace_with_empty_data() {
    let server = mock_server("/traces", 200).await;
    let client = client_for(&server);

    let result = client
        .signal_service()
        .send_trace(&Context::background(), &Trace::from_signals(Vec::new()))
        .await;

    assert!(matches!(result, Err(ClientError::EmptyData)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_trace_without_value() {
    let server = mock_server("/traces", 200).await;
    let client = client_for(&server);

    let result = client
        .signal_service()
        .send_trace(&Context::background(), None)
        .await;

    assert!(matches!(result, Err(ClientError::NilValue)));
}

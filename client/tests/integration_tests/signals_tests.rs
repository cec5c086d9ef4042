//! Integration tests for `POST /signals`.

use signal_client::models::Signal;
use signal_client::{ClientError, Context};

use super::common::{client_for, mock_server, signal, single_request};

fn agent_signal() -> Signal {
    signal("my type", "my signal", "my schema", "hello signal").with_source("agent")
}

#[tokio::test]
async fn test_send_signal() {
    let server = mock_server("/signals", 200).await;
    let client = client_for(&server);
    let sent = agent_signal();

    client
        .signal_service()
        .send_signal(&Context::background(), &sent)
        .await
        .unwrap();

    let request = single_request(&server).await;
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(request.url.path(), "/signals");
    assert_eq!(request.headers["content-type"], "application/json");
    assert_eq!(request.headers["accept"], "application/json");

    let received: Signal = request.body_json().unwrap();
    assert_eq!(received, sent);
}

#[tokio::test]
async fn test_send_signal_wire_format() {
    let server = mock_server("/signals", 200).await;
    let client = client_for(&server);

    client
        .signal_service()
        .send_signal(&Context::background(), &agent_signal())
        .await
        .unwrap();

    let request = single_request(&server).await;
    assert_eq!(request.body.last(), Some(&b'\n'));

    let json: serde_json::Value = request.body_json().unwrap();
    assert_eq!(json["type"], "my type");
    assert_eq!(json["signal_name"], "my signal");
    assert_eq!(json["payload_schema"], "my schema");
    assert_eq!(json["payload"], "hello signal");
    assert_eq!(json["source"], "agent");
    assert!(json.get("actor").is_none());
}

#[tokio::test]
async fn test_send_signal_with_session_token() {
    let server = mock_server("/signals", 200).await;
    let client = signal_client::Client::new(None, "my-token")
        .with_base_url(&server.uri())
        .unwrap();

    client
        .signal_service()
        .send_signal(&Context::background(), &agent_signal())
        .await
        .unwrap();

    let request = single_request(&server).await;
    assert_eq!(request.headers["x-session-key"], "my-token");
}

#[tokio::test]
async fn test_send_signal_without_context() {
    let server = mock_server("/signals", 200).await;
    let client = client_for(&server);

    let result = client.signal_service().send_signal(None, &agent_signal()).await;

    assert!(matches!(result, Err(ClientError::InvalidContext)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_signal_without_value() {
    let server = mock_server("/signals", 200).await;
    let client = client_for(&server);

    let result = client
        .signal_service()
        .send_signal(&Context::background(), None)
        .await;

    assert!(matches!(result, Err(ClientError::NilValue)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

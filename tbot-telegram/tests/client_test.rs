//! Integration tests for [`tbot_telegram::TelegramApi`] against a mockito server.
//!
//! Covers: getUpdates request shape and envelope unwrapping, ok=false mapped to an
//! API error with the remote description, and malformed bodies rejected.

use mockito::Matcher;
use serde_json::json;

use tbot_core::BotError;
use tbot_telegram::{TelegramApi, UpdateSource};

const TOKEN: &str = "123:abc";

/// **Test: fetch_batch posts offset/limit/timeout and unwraps the result array.**
#[tokio::test]
async fn test_fetch_batch_posts_cursor_and_parses_updates() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/bot123:abc/getUpdates")
        .match_body(Matcher::Json(json!({ "offset": 5, "limit": 100, "timeout": 30 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"ok": true, "result": [
                {"update_id": 5, "message": {
                    "message_id": 1,
                    "chat": {"id": 9, "type": "private"},
                    "date": 1724900000,
                    "text": "hello"
                }},
                {"update_id": 6}
            ]}"#,
        )
        .create_async()
        .await;

    let api = TelegramApi::new(TOKEN, Some(&server.url()));
    let updates = api.fetch_batch(5, 100, 30).await.unwrap();

    mock.assert_async().await;
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].update_id, 5);
    assert_eq!(
        updates[0].message.as_ref().unwrap().text.as_deref(),
        Some("hello")
    );
    assert!(updates[1].message.is_none());
}

/// **Test: an ok=false envelope becomes an Api error carrying the description.**
#[tokio::test]
async fn test_error_envelope_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bot123:abc/getUpdates")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
        .create_async()
        .await;

    let api = TelegramApi::new(TOKEN, Some(&server.url()));
    let error = api.fetch_batch(0, 100, 0).await.unwrap_err();

    match error {
        BotError::Api(message) => assert!(message.contains("Unauthorized"), "{}", message),
        other => panic!("expected Api error, got {:?}", other),
    }
}

/// **Test: a non-JSON body is rejected as a malformed response.**
#[tokio::test]
async fn test_malformed_body_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bot123:abc/getUpdates")
        .with_status(200)
        .with_body("<html>gateway timeout</html>")
        .create_async()
        .await;

    let api = TelegramApi::new(TOKEN, Some(&server.url()));
    let error = api.fetch_batch(0, 100, 0).await.unwrap_err();
    assert!(matches!(error, BotError::Api(_)));
}

/// **Test: call_method deserializes a typed result (sendMessage echo).**
#[tokio::test]
async fn test_call_method_returns_typed_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bot123:abc/sendMessage")
        .match_body(Matcher::Json(json!({ "chat_id": 9, "text": "hi" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"ok": true, "result": {
                "message_id": 77,
                "chat": {"id": 9, "type": "private"},
                "date": 1724900000,
                "text": "hi"
            }}"#,
        )
        .create_async()
        .await;

    let api = TelegramApi::new(TOKEN, Some(&server.url()));
    let message: tbot_core::Message = api
        .call_method("sendMessage", json!({ "chat_id": 9, "text": "hi" }))
        .await
        .unwrap();
    assert_eq!(message.message_id, 77);
    assert_eq!(message.text.as_deref(), Some("hi"));
}

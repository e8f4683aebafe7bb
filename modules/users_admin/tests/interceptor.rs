mod common;

use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use common::RecordingSink;
use users_admin::contract::{client::UsersApi, error::Fault, model::NewUser};
use users_admin::domain::notify::NotificationLevel;
use users_admin::gateways::InterceptedUsersClient;
use users_admin::infra::http::HttpUsersClient;
use users_admin::UsersAdminConfig;

fn intercepted(server: &MockServer, sink: Arc<RecordingSink>) -> InterceptedUsersClient {
    let cfg = UsersAdminConfig {
        base_url: server.base_url(),
        request_timeout: Duration::from_millis(300),
        ..Default::default()
    };
    let http = HttpUsersClient::from_config(&cfg).unwrap();
    InterceptedUsersClient::new(Arc::new(http), sink, cfg.notifications)
}

#[tokio::test]
async fn bad_request_is_reported_once_and_reraised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/users");
            then.status(400).body("Bad Request");
        })
        .await;
    let sink = Arc::new(RecordingSink::default());
    let api = intercepted(&server, sink.clone());

    let fault = api.create(NewUser::default()).await.unwrap_err();

    assert!(matches!(fault, Fault::Service { status: 400, .. }));
    let seen = sink.taken();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "Bad Request");
    assert_eq!(seen[0].action, "OK");
    assert_eq!(seen[0].duration, Duration::from_millis(2000));
    assert_eq!(seen[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn success_passes_through_silently() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz", "active": true}
            ]));
        })
        .await;
    let sink = Arc::new(RecordingSink::default());

    let users = intercepted(&server, sink.clone()).list().await.unwrap();

    assert_eq!(users.len(), 1);
    assert!(sink.taken().is_empty());
}

#[tokio::test]
async fn timeout_uses_transport_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!([]));
        })
        .await;
    let sink = Arc::new(RecordingSink::default());

    let fault = intercepted(&server, sink.clone()).list().await.unwrap_err();

    assert!(matches!(fault, Fault::Timeout { .. }));
    let seen = sink.taken();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].message,
        format!("Http failure response for {}/users: 0 Timeout", server.base_url())
    );
}

#[tokio::test]
async fn json_message_payload_is_preferred_over_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/users/9");
            then.status(500)
                .json_body(json!({"message": "database is read-only"}));
        })
        .await;
    let sink = Arc::new(RecordingSink::default());

    let fault = intercepted(&server, sink.clone())
        .remove("9")
        .await
        .unwrap_err();

    assert_eq!(fault.status(), 500);
    assert_eq!(sink.taken()[0].message, "database is read-only");
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_line() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/77");
            then.status(404);
        })
        .await;
    let sink = Arc::new(RecordingSink::default());

    let fault = intercepted(&server, sink.clone())
        .get("77")
        .await
        .unwrap_err();

    assert!(fault.is_not_found());
    assert_eq!(
        sink.taken()[0].message,
        format!("Http failure response for {}/users/77: 404 Not Found", server.base_url())
    );
}

#[tokio::test]
async fn unregistered_status_code_still_has_a_reason() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(599);
        })
        .await;
    let sink = Arc::new(RecordingSink::default());

    let fault = intercepted(&server, sink.clone()).list().await.unwrap_err();

    assert_eq!(fault.status(), 599);
    assert_eq!(
        sink.taken()[0].message,
        format!(
            "Http failure response for {}/users: 599 Unknown Error",
            server.base_url()
        )
    );
}

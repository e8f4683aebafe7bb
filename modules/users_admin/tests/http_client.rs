use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

use modkit::TracedClient;
use users_admin::contract::{
    client::UsersApi,
    error::{ErrorBody, Fault},
    model::{NewUser, UserPatch},
};
use users_admin::infra::http::HttpUsersClient;
use users_admin::UsersAdminConfig;

fn client_for(server: &MockServer) -> HttpUsersClient {
    let cfg = UsersAdminConfig {
        base_url: server.base_url(),
        request_timeout: Duration::from_millis(500),
        ..Default::default()
    };
    HttpUsersClient::from_config(&cfg).unwrap()
}

#[tokio::test]
async fn list_returns_every_record() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz", "active": true},
                {"id": "2", "name": "Ervin Howell", "email": "Shanna@melissa.tv", "active": false}
            ]));
        })
        .await;

    let users = client_for(&server).list().await.unwrap();

    mock.assert_async().await;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id.as_deref(), Some("1"));
    assert_eq!(users[1].id.as_deref(), Some("2"));
    assert!(!users[1].active);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/42");
            then.status(404).json_body(json!({}));
        })
        .await;

    let fault = client_for(&server).get("42").await.unwrap_err();
    assert!(fault.is_not_found());
    assert_eq!(fault.status(), 404);
    match fault {
        Fault::NotFound { id, url, .. } => {
            assert_eq!(id, "42");
            assert!(url.ends_with("/users/42"));
        }
        other => panic!("unexpected fault: {other:?}"),
    }
}

#[tokio::test]
async fn create_posts_body_without_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/users").json_body(json!({
                "name": "Clementine Bauch",
                "username": "",
                "email": "Nathan@yesenia.net",
                "phone": "",
                "address": {"street": "", "suite": "", "city": "", "zipcode": ""},
                "active": true
            }));
            then.status(201).json_body(json!({
                "id": 11,
                "name": "Clementine Bauch",
                "email": "Nathan@yesenia.net",
                "active": true
            }));
        })
        .await;

    let created = client_for(&server)
        .create(NewUser {
            name: "Clementine Bauch".into(),
            email: "Nathan@yesenia.net".into(),
            active: true,
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.id.as_deref(), Some("11"));
}

#[tokio::test]
async fn update_puts_only_present_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/users/3")
                .json_body(json!({"active": false}));
            then.status(200).json_body(json!({
                "id": 3,
                "name": "Clementine Bauch",
                "email": "Nathan@yesenia.net",
                "active": false
            }));
        })
        .await;

    let updated = client_for(&server)
        .update(
            "3",
            UserPatch {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(!updated.active);
}

#[tokio::test]
async fn remove_accepts_empty_success_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/users/5");
            then.status(200).body("{}");
        })
        .await;

    client_for(&server).remove("5").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/users");
            then.status(400).body("Bad Request");
        })
        .await;

    let fault = client_for(&server)
        .create(NewUser::default())
        .await
        .unwrap_err();

    match fault {
        Fault::Service {
            status,
            status_text,
            body,
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(status_text, "Bad Request");
            assert_eq!(body, ErrorBody::Text("Bad Request".into()));
        }
        other => panic!("unexpected fault: {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_is_a_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!([]));
        })
        .await;

    let fault = client_for(&server).list().await.unwrap_err();
    assert!(matches!(fault, Fault::Timeout { .. }), "{fault:?}");
    assert_eq!(fault.status(), 0);
}

#[tokio::test]
async fn unreachable_host_is_a_network_fault() {
    // Port 9 (discard) on localhost is closed in test environments.
    let client = HttpUsersClient::new(TracedClient::default(), "http://127.0.0.1:9").unwrap();
    let fault = client.list().await.unwrap_err();
    assert!(matches!(fault, Fault::Network { .. }), "{fault:?}");
}

#[tokio::test]
async fn malformed_payload_is_unknown() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).body("not json");
        })
        .await;

    let fault = client_for(&server).list().await.unwrap_err();
    assert!(matches!(fault, Fault::Unknown { .. }), "{fault:?}");
}

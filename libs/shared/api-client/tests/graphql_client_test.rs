use assert_matches::assert_matches;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_api_client::HealthieClient;
use shared_models::ApiError;
use shared_utils::test_utils::{MockHealthieResponses, TestConfig};

fn client_for(server: &MockServer) -> HealthieClient {
    HealthieClient::new(&TestConfig::with_url(server.uri()).to_app_config())
}

#[tokio::test]
async fn test_execute_sends_auth_headers_and_returns_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("Authorization", "Basic test-api-key"))
        .and(header("AuthorizationSource", "API"))
        .and(header("Content-Type", "application/json"))
        .and(body_string_contains("currentUser"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockHealthieResponses::current_user_response("42")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = client_for(&mock_server).current_user().await.unwrap().unwrap();

    assert_eq!(user.id.as_deref(), Some("42"));
    assert_eq!(user.first_name.as_deref(), Some("Notify"));
}

#[tokio::test]
async fn test_graphql_errors_are_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockHealthieResponses::error_response(&["first", "second"])),
        )
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).execute::<Value>("query { x }", json!({})).await;

    assert_matches!(result, Err(ApiError::Upstream(msg)) if msg == "first, second");
}

#[tokio::test]
async fn test_structured_errors_preferred_over_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(MockHealthieResponses::error_response(&["API key is invalid"])),
        )
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).current_user().await;

    assert_matches!(result, Err(ApiError::Upstream(msg)) if msg == "API key is invalid");
}

#[tokio::test]
async fn test_http_failure_without_error_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).current_user().await.unwrap_err();

    assert!(err.is_authentication_failure());
    assert_matches!(err, ApiError::Http { body, .. } if body == "forbidden");
}

#[tokio::test]
async fn test_missing_data_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).users_with_appointments().await;

    assert_matches!(result, Err(ApiError::MissingData));
}

#[tokio::test]
async fn test_null_users_list_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("GetUsersWithAppointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "users": null } })))
        .mount(&mock_server)
        .await;

    let users = client_for(&mock_server).users_with_appointments().await.unwrap();

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_create_conversation_passes_variables() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("createConversation"))
        .and(body_partial_json(json!({
            "variables": { "simple_added_users": "ds-7", "name": "Subject" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockHealthieResponses::conversation_rejected("simple_added_users", "is invalid")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = client_for(&mock_server)
        .create_conversation("ds-7", "Subject")
        .await
        .unwrap();

    assert_eq!(payload.conversation_id(), None);
    assert_eq!(payload.messages.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_note_returns_note() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("createNote"))
        .and(body_partial_json(json!({
            "variables": { "user_id": "sender-1", "content": "hello", "conversation_id": "conv-1" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockHealthieResponses::note_created("n-1", "sender-1")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = client_for(&mock_server)
        .create_note("sender-1", "hello", "conv-1")
        .await
        .unwrap();

    assert_eq!(payload.note.unwrap().id.as_deref(), Some("n-1"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let client = HealthieClient::new(&TestConfig::with_url("http://127.0.0.1:1").to_app_config());

    let result = client.current_user().await;

    assert_matches!(result, Err(ApiError::Transport(_)));
}

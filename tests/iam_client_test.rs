mod common;

use common::{iam_client, mock_iam_token};
use ibmcloud_evidence::domain::models::ApiKey;
use ibmcloud_evidence::{IamError, TokenProvider};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_successful_token_exchange() {
    let server = MockServer::start().await;
    mock_iam_token(&server, "my-api-key", "eyJaccess").await;

    let client = iam_client(&server);
    let tokens = client.get_tokens(&ApiKey::new("my-api-key")).await.unwrap();

    assert_eq!(tokens.access_token.expose(), "eyJaccess");
    assert_eq!(tokens.token_type.as_deref(), Some("Bearer"));
    assert_eq!(tokens.expires_in, Some(3600));
}

#[tokio::test]
async fn test_request_is_form_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = iam_client(&server);
    let tokens = client.get_tokens(&ApiKey::new("k")).await.unwrap();
    assert_eq!(tokens.access_token.expose(), "tok");
}

#[tokio::test]
async fn test_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorCode": "BXNIM0415E",
            "errorMessage": "Provided API key could not be found.",
            "context": {"apikey": "leaked-key-value"}
        })))
        .mount(&server)
        .await;

    let client = iam_client(&server);
    let err = client.get_tokens(&ApiKey::new("bad")).await.unwrap_err();

    match err {
        IamError::Rejected { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("BXNIM0415E"));
            assert!(!body.contains("leaked-key-value"));
        }
        other => panic!("Expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = iam_client(&server);
    let err = client.get_tokens(&ApiKey::new("k")).await.unwrap_err();

    assert!(matches!(
        err,
        IamError::ServerError { status: StatusCode::SERVICE_UNAVAILABLE, .. }
    ));
    assert!(!err.is_rejection());
}

#[tokio::test]
async fn test_missing_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&server)
        .await;

    let client = iam_client(&server);
    let err = client.get_tokens(&ApiKey::new("k")).await.unwrap_err();
    assert!(matches!(err, IamError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_empty_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": ""})))
        .mount(&server)
        .await;

    let client = iam_client(&server);
    let err = client.get_tokens(&ApiKey::new("k")).await.unwrap_err();
    assert!(matches!(err, IamError::MissingAccessToken));
}

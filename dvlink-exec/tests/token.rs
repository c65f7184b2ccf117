use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use dvlink_core::error::AuthError;
use dvlink_core::types::Credentials;
use dvlink_exec::{
    fetch_token, ExecutorConfig, HttpClient, HttpError, HttpRequestParts, HttpResponseParts,
    Method,
};
use serde_json::json;

// Mock authorization server: one canned response, records what it was sent.
struct MockTokenEndpoint {
    response: Result<HttpResponseParts, HttpError>,
    seen: Mutex<Vec<HttpRequestParts>>,
}

impl MockTokenEndpoint {
    fn respond(status: u16, body: &str) -> Self {
        Self {
            response: Ok(HttpResponseParts {
                status,
                headers: BTreeMap::new(),
                body: body.as_bytes().to_vec(),
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn fail(err: HttpError) -> Self {
        Self {
            response: Err(err),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpClient for MockTokenEndpoint {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        self.seen.lock().unwrap().push(req);
        self.response.clone()
    }
}

fn credentials() -> Credentials {
    serde_json::from_value(json!({
        "base": "https://api.example.com/.",
        "client": "clientId",
        "secret": "clientSecret",
        "scope": "default",
        "access": "https://login.example.com/tenant/oauth2/v2.0/token"
    }))
    .unwrap()
}

#[tokio::test]
async fn issues_the_exact_client_credentials_form_body() {
    let mock = MockTokenEndpoint::respond(200, r#"{"access_token":"abc"}"#);

    let token = fetch_token(&mock, &ExecutorConfig::default(), &credentials())
        .await
        .unwrap();
    assert_eq!(token.expose(), "abc");

    let seen = mock.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let req = &seen[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(
        req.url.as_str(),
        "https://login.example.com/tenant/oauth2/v2.0/token"
    );
    assert_eq!(
        req.headers.get("Content-Type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );
    // Scope is base and scope concatenated, then percent-encoded.
    assert_eq!(
        String::from_utf8(req.body.clone()).unwrap(),
        "grant_type=client_credentials&client_id=clientId&client_secret=clientSecret\
         &scope=https%3A%2F%2Fapi.example.com%2F.default"
    );
}

#[tokio::test]
async fn non_2xx_status_carries_the_response_body() {
    let mock = MockTokenEndpoint::respond(400, "invalid_client");

    let err = fetch_token(&mock, &ExecutorConfig::default(), &credentials())
        .await
        .unwrap_err();
    match err {
        AuthError::TokenEndpoint { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "invalid_client");
        }
        other => panic!("expected TokenEndpoint, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_access_token_field_is_an_auth_error() {
    let mock = MockTokenEndpoint::respond(200, r#"{"token_type":"Bearer"}"#);

    let err = fetch_token(&mock, &ExecutorConfig::default(), &credentials())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::MissingAccessToken));
}

#[tokio::test]
async fn non_json_token_body_is_an_auth_error() {
    let mock = MockTokenEndpoint::respond(200, "<html>maintenance</html>");

    let err = fetch_token(&mock, &ExecutorConfig::default(), &credentials())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidTokenBody(_)));
}

#[tokio::test]
async fn transport_timeout_maps_to_auth_timeout() {
    let mock = MockTokenEndpoint::fail(HttpError::Timeout);

    let err = fetch_token(&mock, &ExecutorConfig::default(), &credentials())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Timeout));
}

#[tokio::test]
async fn connect_failure_maps_to_auth_transport() {
    let mock = MockTokenEndpoint::fail(HttpError::Network("dns failure".to_string()));

    let err = fetch_token(&mock, &ExecutorConfig::default(), &credentials())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
}

#[tokio::test]
async fn unparseable_token_url_fails_before_any_request() {
    let mock = MockTokenEndpoint::respond(200, r#"{"access_token":"abc"}"#);
    let mut creds = credentials();
    creds.token_url = "not a url".to_string();

    let err = fetch_token(&mock, &ExecutorConfig::default(), &creds)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidTokenUrl(_)));
    assert!(mock.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_token_response_is_rejected() {
    let mock = MockTokenEndpoint::respond(200, r#"{"access_token":"abc"}"#);
    let config = ExecutorConfig {
        max_response_bytes: 4,
        ..ExecutorConfig::default()
    };

    let err = fetch_token(&mock, &config, &credentials()).await.unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
}

use std::collections::BTreeMap;

use dvlink_core::error::AuthError;
use dvlink_core::types::{AccessToken, Credentials};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::config::ExecutorConfig;
use crate::http::{HttpClient, HttpError, HttpRequestParts};
use crate::request::Method;

/// Exchanges client credentials for a bearer token.
///
/// Stateless: no process-wide cache, every invocation pays one round trip to
/// the authorization server. Goes through the same [`HttpClient`] seam as
/// the entity calls.
pub async fn fetch_token(
    http: &dyn HttpClient,
    config: &ExecutorConfig,
    credentials: &Credentials,
) -> Result<AccessToken, AuthError> {
    let url = Url::parse(&credentials.token_url)
        .map_err(|e| AuthError::InvalidTokenUrl(e.to_string()))?;

    let mut headers = BTreeMap::new();
    headers.insert(
        "Content-Type".to_string(),
        "application/x-www-form-urlencoded".to_string(),
    );

    let req = HttpRequestParts {
        method: Method::Post,
        url,
        headers,
        body: form_body(credentials).into_bytes(),
    };

    let resp = http
        .send(req, config.request_timeout)
        .await
        .map_err(|e| match e {
            HttpError::Timeout => AuthError::Timeout,
            other => AuthError::Transport(other.to_string()),
        })?;

    if resp.body.len() > config.max_response_bytes {
        return Err(AuthError::Transport(format!(
            "token response exceeds {} bytes",
            config.max_response_bytes
        )));
    }

    if !(200..300).contains(&resp.status) {
        error!(status = resp.status, "token endpoint rejected the credentials");
        return Err(AuthError::TokenEndpoint {
            status: resp.status,
            body: String::from_utf8_lossy(&resp.body).into_owned(),
        });
    }

    let json: Value = serde_json::from_slice(&resp.body).map_err(AuthError::InvalidTokenBody)?;
    let token = json
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or(AuthError::MissingAccessToken)?;

    debug!("token endpoint issued an access token");
    Ok(AccessToken::new(token))
}

/// Form body for the client-credentials grant.
///
/// The scope parameter is `<base><scope>` concatenated, not the scope field
/// alone; the authorization server expects the resource-qualified form, e.g.
/// `https://org.crm.example.com/.default`.
fn form_body(credentials: &Credentials) -> String {
    let scope = format!("{}{}", credentials.base, credentials.scope);
    let pairs = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.expose()),
        ("scope", scope.as_str()),
    ];
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

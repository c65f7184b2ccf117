use std::collections::BTreeMap;
use std::sync::Arc;

use dvlink_core::error::{RemoteError, RemoteErrorKind};
use dvlink_core::types::AccessToken;
use serde_json::{Map, Value};
use tracing::{error, info};
use url::Url;

use crate::config::ExecutorConfig;
use crate::http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts};
use crate::request::Method;

/// Successful exchange, before any JSON decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// HTTP 204: the remote confirmed the operation and sent nothing back.
    Empty,
    /// Any other 2xx: the raw body text, parsed one layer up.
    Text(String),
}

/// Sends built requests and classifies what comes back.
///
/// Every call attaches the bearer token and applies the configured timeout
/// and response-size cap; non-2xx statuses map onto [`RemoteErrorKind`].
/// Protocol-only: decoding the body happens in the dispatcher.
pub struct HttpExecutor {
    http: Arc<dyn HttpClient>,
    config: ExecutorConfig,
}

impl HttpExecutor {
    pub fn new(http: Arc<dyn HttpClient>, config: ExecutorConfig) -> Self {
        Self { http, config }
    }

    pub async fn get(&self, url: &Url, token: &AccessToken) -> Result<ResponseBody, RemoteError> {
        self.send(Method::Get, url, token, BTreeMap::new(), None)
            .await
    }

    pub async fn post(
        &self,
        url: &Url,
        token: &AccessToken,
        headers: BTreeMap<String, String>,
        body: Option<&Map<String, Value>>,
    ) -> Result<ResponseBody, RemoteError> {
        self.send(Method::Post, url, token, headers, body).await
    }

    pub async fn patch(
        &self,
        url: &Url,
        token: &AccessToken,
        headers: BTreeMap<String, String>,
        body: Option<&Map<String, Value>>,
    ) -> Result<ResponseBody, RemoteError> {
        self.send(Method::Patch, url, token, headers, body).await
    }

    pub async fn put(
        &self,
        url: &Url,
        token: &AccessToken,
        headers: BTreeMap<String, String>,
        body: Option<&Map<String, Value>>,
    ) -> Result<ResponseBody, RemoteError> {
        self.send(Method::Put, url, token, headers, body).await
    }

    /// DELETE takes a body to match the call shape of the other mutating
    /// verbs but never transmits it.
    pub async fn delete(
        &self,
        url: &Url,
        token: &AccessToken,
        headers: BTreeMap<String, String>,
        body: Option<&Map<String, Value>>,
    ) -> Result<ResponseBody, RemoteError> {
        let _ = body;
        self.send(Method::Delete, url, token, headers, None).await
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        token: &AccessToken,
        mut headers: BTreeMap<String, String>,
        body: Option<&Map<String, Value>>,
    ) -> Result<ResponseBody, RemoteError> {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", token.expose()),
        );

        let body = match body {
            Some(map) => serde_json::to_vec(map).map_err(|e| {
                RemoteError::new(
                    RemoteErrorKind::Transport,
                    format!("failed to serialize request body: {e}"),
                )
            })?,
            None => Vec::new(),
        };

        let req = HttpRequestParts {
            method,
            url: url.clone(),
            headers,
            body,
        };

        let resp = self
            .http
            .send(req, self.config.request_timeout)
            .await
            .map_err(|e| {
                let err = transport_error(e);
                error!(%method, %url, kind = %err.kind, "entity request failed before a response arrived");
                err
            })?;

        self.classify(method, url, resp)
    }

    fn classify(
        &self,
        method: Method,
        url: &Url,
        resp: HttpResponseParts,
    ) -> Result<ResponseBody, RemoteError> {
        if resp.body.len() > self.config.max_response_bytes {
            return Err(RemoteError::new(
                RemoteErrorKind::Transport,
                format!(
                    "response body exceeds {} bytes",
                    self.config.max_response_bytes
                ),
            ));
        }

        match resp.status {
            204 => {
                info!(%method, %url, status = 204u16, "entity request succeeded with no content");
                Ok(ResponseBody::Empty)
            }
            status @ 200..=299 => {
                info!(%method, %url, status, "entity request succeeded");
                Ok(ResponseBody::Text(
                    String::from_utf8_lossy(&resp.body).into_owned(),
                ))
            }
            status => {
                let kind = RemoteErrorKind::from_status(status);
                error!(%method, %url, status, %kind, "entity endpoint returned an error");
                Err(RemoteError::new(
                    kind,
                    String::from_utf8_lossy(&resp.body).into_owned(),
                ))
            }
        }
    }
}

fn transport_error(e: HttpError) -> RemoteError {
    let kind = match e {
        HttpError::Timeout => RemoteErrorKind::Timeout,
        HttpError::Network(_) | HttpError::Other(_) => RemoteErrorKind::Transport,
    };
    RemoteError::new(kind, e.to_string())
}

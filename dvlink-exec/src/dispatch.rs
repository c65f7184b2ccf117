use std::sync::Arc;

use dvlink_core::error::{ConnectorError, DecodeError, ValidationError};
use dvlink_core::types::{ConnectorRequest, Credentials, Operation, OperationRequest};
use dvlink_core::validate::validate_request;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ExecutorConfig;
use crate::executor::{HttpExecutor, ResponseBody};
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::request::{build_request, Method};
use crate::token::fetch_token;

/// Runs one operation end to end: validate, authenticate, build, execute,
/// decode.
///
/// Holds no per-invocation state; a single instance is safe to share across
/// concurrent invocations.
pub struct Dispatcher {
    http: Arc<dyn HttpClient>,
    executor: HttpExecutor,
    config: ExecutorConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()), ExecutorConfig::default())
    }
}

impl Dispatcher {
    pub fn new(http: Arc<dyn HttpClient>, config: ExecutorConfig) -> Self {
        let executor = HttpExecutor::new(Arc::clone(&http), config.clone());
        Self {
            http,
            executor,
            config,
        }
    }

    /// Convenience over [`Dispatcher::dispatch`] for the host envelope.
    pub async fn execute(
        &self,
        envelope: &ConnectorRequest,
    ) -> Result<Map<String, Value>, ConnectorError> {
        self.dispatch(&envelope.request, &envelope.authentication)
            .await
    }

    /// Dispatches one operation with the given credentials.
    ///
    /// Stage order: envelope validation (no network), token fetch, operation
    /// parse and request build, entity call, decode. An unrecognized
    /// operation therefore fails after authentication but before any entity
    /// traffic.
    pub async fn dispatch(
        &self,
        request: &OperationRequest,
        credentials: &Credentials,
    ) -> Result<Map<String, Value>, ConnectorError> {
        validate_request(credentials, request)?;

        debug!(
            entity = %request.target,
            operation = %request.operation,
            "dispatching entity operation"
        );

        let token = fetch_token(self.http.as_ref(), &self.config, credentials).await?;

        let operation = Operation::parse(&request.operation).ok_or_else(|| {
            ValidationError::single(
                "$.operation",
                format!("unrecognized operation `{}`", request.operation),
            )
        })?;

        let built = build_request(
            &credentials.base,
            &request.target,
            operation,
            &request.fields,
            request.entity_id.as_deref(),
            request.body.as_ref(),
        )?;

        let response = match built.method {
            Method::Get => self.executor.get(&built.url, &token).await?,
            Method::Post => {
                self.executor
                    .post(&built.url, &token, built.headers, built.body.as_ref())
                    .await?
            }
            Method::Patch => {
                self.executor
                    .patch(&built.url, &token, built.headers, built.body.as_ref())
                    .await?
            }
            Method::Put => {
                self.executor
                    .put(&built.url, &token, built.headers, built.body.as_ref())
                    .await?
            }
            Method::Delete => {
                self.executor
                    .delete(&built.url, &token, built.headers, built.body.as_ref())
                    .await?
            }
        };

        Ok(decode_output(response)?)
    }
}

/// 204 normalizes to an empty mapping; anything else must parse as a JSON
/// object.
fn decode_output(response: ResponseBody) -> Result<Map<String, Value>, DecodeError> {
    match response {
        ResponseBody::Empty => Ok(Map::new()),
        ResponseBody::Text(text) => {
            let value: Value = serde_json::from_str(&text).map_err(DecodeError::NotJson)?;
            match value {
                Value::Object(map) => Ok(map),
                _ => Err(DecodeError::NotAnObject),
            }
        }
    }
}

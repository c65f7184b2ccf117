use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint URL is not a valid absolute URL: {0}")]
    InvalidTokenUrl(String),
    #[error("token endpoint returned HTTP {status}: {body}")]
    TokenEndpoint { status: u16, body: String },
    #[error("token response is not valid JSON: {0}")]
    InvalidTokenBody(#[source] serde_json::Error),
    #[error("token response has no `access_token` field")]
    MissingAccessToken,
    #[error("token request timed out")]
    Timeout,
    #[error("token request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
#[error("connector input failed validation ({violations_len} violations)")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(path, message)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("entity endpoint failed ({kind}): {body}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub body: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    InternalServerError,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Generic,
    Timeout,
    Transport,
}

impl RemoteErrorKind {
    /// Classifies a non-2xx entity-endpoint status. First match wins.
    pub fn from_status(status: u16) -> Self {
        match status {
            500 => Self::InternalServerError,
            400 => Self::BadRequest,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            _ => Self::Generic,
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InternalServerError => "internal server error",
            Self::BadRequest => "bad request",
            Self::NotFound => "not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Generic => "unexpected status",
            Self::Timeout => "timeout",
            Self::Transport => "transport failure",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),
    #[error("response body is valid JSON but not an object")]
    NotAnObject,
}

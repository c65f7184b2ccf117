#![forbid(unsafe_code)]

pub mod error;
pub mod types;
pub mod validate;

pub use crate::error::{
    AuthError, ConnectorError, DecodeError, RemoteError, RemoteErrorKind, ValidationError,
    Violation,
};
pub use crate::types::{
    collection_for_target, AccessToken, ConnectorRequest, Credentials, Operation,
    OperationRequest, SecretString,
};
pub use crate::validate::{validate_request, Validate};

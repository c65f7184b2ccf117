mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::{ConnectorRequest, Credentials, OperationRequest};
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for ConnectorRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_request(&self.authentication, &self.request)
    }
}

/// Checks the invocation envelope before any network traffic happens.
///
/// Covers field presence and the target mapping only. Operation-specific
/// rules (entity id requirements) run later, when the request is built.
pub fn validate_request(
    credentials: &Credentials,
    request: &OperationRequest,
) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    rules::validate_credentials(&mut v, credentials);
    rules::validate_operation(&mut v, request);
    v.finish()
}

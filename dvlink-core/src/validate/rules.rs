use crate::types::{collection_for_target, Credentials, OperationRequest};
use crate::validate::validator::Validator;

pub(crate) fn validate_credentials(v: &mut Validator, credentials: &Credentials) {
    v.require_non_empty("$.authentication.base", &credentials.base);
    v.require_non_empty("$.authentication.client", &credentials.client_id);
    if credentials.client_secret.expose().trim().is_empty() {
        v.push("$.authentication.secret", "must not be empty");
    }
    v.require_non_empty("$.authentication.scope", &credentials.scope);
    v.require_non_empty("$.authentication.access", &credentials.token_url);
}

pub(crate) fn validate_operation(v: &mut Validator, request: &OperationRequest) {
    v.require_non_empty("$.operation", &request.operation);

    if request.target.trim().is_empty() {
        v.push("$.target", "must not be empty");
    } else if collection_for_target(&request.target).is_none() {
        v.push("$.target", "is not a known target entity");
    }
}

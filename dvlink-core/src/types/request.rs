use serde_json::{Map, Value};

use crate::types::Credentials;

/// Declarative description of one entity operation.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct OperationRequest {
    /// Logical entity name, resolved to a collection path during dispatch
    /// (`account` maps to `accounts`).
    pub target: String,

    /// Wire-level operation name; parsed into [`Operation`] at dispatch
    /// time, not here.
    ///
    /// [`Operation`]: crate::types::Operation
    pub operation: String,

    /// Columns for the `$select` projection, joined in the given order.
    /// Only GetEntry reads them.
    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default, rename = "accountId")]
    pub entity_id: Option<String>,

    #[serde(default, rename = "requestBody")]
    pub body: Option<Map<String, Value>>,
}

/// Full invocation envelope as the host engine submits it.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ConnectorRequest {
    pub authentication: Credentials,

    #[serde(flatten)]
    pub request: OperationRequest,
}

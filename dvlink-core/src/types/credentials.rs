use crate::types::SecretString;

/// Connection material supplied by the host engine per invocation.
///
/// Wire names follow the host envelope (`client`, `secret`, `access`), not
/// the OAuth2 parameter names. All five fields must be non-empty; see
/// `validate`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Credentials {
    /// Entity API root, e.g. `https://org.crm.example.com/api/data/v9.2`.
    pub base: String,

    #[serde(rename = "client")]
    pub client_id: String,

    #[serde(rename = "secret")]
    pub client_secret: SecretString,

    /// Scope suffix concatenated onto `base` to form the OAuth2 scope
    /// parameter (`<base><scope>`), e.g. `.default`.
    pub scope: String,

    /// Token endpoint URL.
    #[serde(rename = "access")]
    pub token_url: String,
}

use std::collections::BTreeMap;

use dvlink_core::error::ValidationError;
use dvlink_core::types::{collection_for_target, Operation};
use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully assembled entity request, ready for the executor.
///
/// Consumed once; nothing here outlives the invocation.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    pub method: Method,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Map<String, Value>>,
}

/// Translates one operation descriptor into a concrete request. Pure.
///
/// The entity id is appended in OData parenthesis form (`accounts(<id>)`);
/// `fields` become a `$select` projection joined in the given order with no
/// dedup or sorting. For DeleteEntry the body is carried along but dropped
/// at send time.
pub fn build_request(
    base: &str,
    target: &str,
    operation: Operation,
    fields: &[String],
    entity_id: Option<&str>,
    body: Option<&Map<String, Value>>,
) -> Result<BuiltRequest, ValidationError> {
    let collection = collection_for_target(target)
        .ok_or_else(|| ValidationError::single("$.target", "is not a known target entity"))?;

    let mut url = entity_root(base, collection)?;
    let entity_id = entity_id.filter(|id| !id.is_empty());

    if operation.requires_entity_id() {
        let id = entity_id.ok_or_else(|| {
            ValidationError::single(
                "$.accountId",
                format!("must be a non-empty entity id for {operation}"),
            )
        })?;
        address_entity(&mut url, id);
    }

    match operation {
        Operation::GetAll => Ok(BuiltRequest {
            method: Method::Get,
            url,
            headers: BTreeMap::new(),
            body: None,
        }),
        Operation::GetEntry => {
            if let Some(id) = entity_id {
                address_entity(&mut url, id);
            }
            if !fields.is_empty() {
                url.set_query(Some(&format!("$select={}", fields.join(","))));
            }
            Ok(BuiltRequest {
                method: Method::Get,
                url,
                headers: BTreeMap::new(),
                body: None,
            })
        }
        Operation::CreateEntry => Ok(BuiltRequest {
            method: Method::Post,
            url,
            headers: json_headers(&[("Prefer", "return=representation")]),
            body: body.cloned(),
        }),
        Operation::UpdateEntry => Ok(BuiltRequest {
            method: Method::Patch,
            url,
            headers: json_headers(&[("If-Match", "*"), ("Prefer", "return=representation")]),
            body: body.cloned(),
        }),
        Operation::DeleteEntry => Ok(BuiltRequest {
            method: Method::Delete,
            url,
            headers: json_headers(&[]),
            body: body.cloned(),
        }),
    }
}

fn entity_root(base: &str, collection: &str) -> Result<Url, ValidationError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), collection);
    Url::parse(&joined).map_err(|e| {
        ValidationError::single(
            "$.authentication.base",
            format!("must be a valid absolute URL: {e}"),
        )
    })
}

/// Appends `(<id>)` to the collection path. Ids are percent-encoded; the
/// parentheses stay verbatim, which the `url` crate preserves in paths.
fn address_entity(url: &mut Url, entity_id: &str) {
    let path = format!("{}({})", url.path(), urlencoding::encode(entity_id));
    url.set_path(&path);
}

fn json_headers(extra: &[(&str, &str)]) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    for (k, v) in extra {
        headers.insert((*k).to_string(), (*v).to_string());
    }
    headers
}

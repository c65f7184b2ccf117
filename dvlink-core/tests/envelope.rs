use dvlink_core::types::{AccessToken, ConnectorRequest, Operation};
use serde_json::json;

fn full_envelope_json() -> serde_json::Value {
    json!({
        "authentication": {
            "base": "https://org.crm.example.com/api/data/v9.2",
            "client": "0b25ab0e-7b92-4a0f-9d5a-305e01e8f7a2",
            "secret": "s3cr3t-value",
            "scope": "/.default",
            "access": "https://login.example.com/tenant/oauth2/v2.0/token"
        },
        "target": "account",
        "operation": "getEntry",
        "fields": ["name", "revenue"],
        "accountId": "f9be1d0e-6787-4b41-8e0b-2f4a8e7c3b10",
        "requestBody": { "name": "Contoso" }
    })
}

#[test]
fn envelope_binds_wire_field_names() {
    let envelope: ConnectorRequest = serde_json::from_value(full_envelope_json()).unwrap();

    let auth = &envelope.authentication;
    assert_eq!(auth.base, "https://org.crm.example.com/api/data/v9.2");
    assert_eq!(auth.client_id, "0b25ab0e-7b92-4a0f-9d5a-305e01e8f7a2");
    assert_eq!(auth.client_secret.expose(), "s3cr3t-value");
    assert_eq!(auth.scope, "/.default");
    assert_eq!(
        auth.token_url,
        "https://login.example.com/tenant/oauth2/v2.0/token"
    );

    let request = &envelope.request;
    assert_eq!(request.target, "account");
    assert_eq!(request.operation, "getEntry");
    assert_eq!(request.fields, vec!["name", "revenue"]);
    assert_eq!(
        request.entity_id.as_deref(),
        Some("f9be1d0e-6787-4b41-8e0b-2f4a8e7c3b10")
    );
    let body = request.body.as_ref().unwrap();
    assert_eq!(body.get("name"), Some(&json!("Contoso")));
}

#[test]
fn optional_envelope_fields_default() {
    let mut value = full_envelope_json();
    let obj = value.as_object_mut().unwrap();
    obj.remove("fields");
    obj.remove("accountId");
    obj.remove("requestBody");

    let envelope: ConnectorRequest = serde_json::from_value(value).unwrap();
    assert!(envelope.request.fields.is_empty());
    assert!(envelope.request.entity_id.is_none());
    assert!(envelope.request.body.is_none());
}

#[test]
fn secrets_are_redacted_in_debug_output() {
    let envelope: ConnectorRequest = serde_json::from_value(full_envelope_json()).unwrap();

    let rendered = format!("{:?}", envelope.authentication);
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("s3cr3t-value"));

    let token = AccessToken::new("eyJ0eXAiOiJKV1Qi");
    let rendered = format!("{token:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("eyJ0eXAiOiJKV1Qi"));
}

#[test]
fn known_operation_strings_parse() {
    assert_eq!(Operation::parse("getAll"), Some(Operation::GetAll));
    assert_eq!(Operation::parse("getEntry"), Some(Operation::GetEntry));
    assert_eq!(Operation::parse("createEntry"), Some(Operation::CreateEntry));
    assert_eq!(Operation::parse("updateEntry"), Some(Operation::UpdateEntry));
    assert_eq!(Operation::parse("deleteEntry"), Some(Operation::DeleteEntry));
}

#[test]
fn unknown_operation_strings_do_not_parse() {
    assert_eq!(Operation::parse("frobnicate"), None);
    assert_eq!(Operation::parse(""), None);
    // Case matters: the envelope uses camelCase verbatim.
    assert_eq!(Operation::parse("GETALL"), None);
    assert_eq!(Operation::parse("getall"), None);
}

#[test]
fn operation_wire_names_round_trip() {
    for op in [
        Operation::GetAll,
        Operation::GetEntry,
        Operation::CreateEntry,
        Operation::UpdateEntry,
        Operation::DeleteEntry,
    ] {
        assert_eq!(Operation::parse(op.as_str()), Some(op));
    }
}

#[test]
fn only_update_and_delete_require_an_entity_id() {
    assert!(Operation::UpdateEntry.requires_entity_id());
    assert!(Operation::DeleteEntry.requires_entity_id());
    assert!(!Operation::GetAll.requires_entity_id());
    assert!(!Operation::GetEntry.requires_entity_id());
    assert!(!Operation::CreateEntry.requires_entity_id());
}

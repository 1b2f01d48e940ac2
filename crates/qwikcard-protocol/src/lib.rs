use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One `{type, value}` entry as exchanged with the profile store.
///
/// The type is kept as its raw token so profiles written by newer clients
/// still deserialize here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct FieldPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl FieldPayload {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Body of `POST /api/create-profile`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct CreateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldPayload>,
}

/// Success body of `POST /api/create-profile`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct CreateProfileResponse {
    pub profile_id: String,
}

/// Success body of `GET /api/profile/{id}`.
///
/// The store may echo its own row columns (`id` among them); anything beyond
/// `name` and `fields` is ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ProfileRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldPayload>,
}

/// Path of the create endpoint relative to the API base.
pub const CREATE_PROFILE_PATH: &str = "/api/create-profile";

/// Path of the fetch endpoint for `profile_id`, relative to the API base.
pub fn profile_path(profile_id: &str) -> String {
    format!("/api/profile/{profile_id}")
}

/// Path of the vCard download for `profile_id`, relative to the API base.
pub fn vcard_path(profile_id: &str) -> String {
    format!("/api/profile/{profile_id}/vcard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_payload_uses_type_key_on_the_wire() {
        let payload = FieldPayload::new("phone", "+1 555-0100");
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value, json!({"type": "phone", "value": "+1 555-0100"}));
    }

    #[test]
    fn profile_record_ignores_extra_store_columns() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "id": "abc123",
            "name": "Ada",
            "fields": [{"type": "email", "value": "ada@example.com"}],
            "created": "2024-01-01"
        }))
        .expect("deserialize");
        assert_eq!(record.id.as_deref(), Some("abc123"));
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields[0].kind, "email");
    }

    #[test]
    fn record_without_fields_defaults_to_empty() {
        let record: ProfileRecord =
            serde_json::from_value(json!({"name": "Ada"})).expect("deserialize");
        assert!(record.fields.is_empty());
        assert!(record.id.is_none());
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(profile_path("xyz"), "/api/profile/xyz");
        assert_eq!(vcard_path("xyz"), "/api/profile/xyz/vcard");
    }
}

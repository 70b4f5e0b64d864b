use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::Field;
use super::PartialConfig;

/// The final config handed to the transform hook and written to the artifact.
///
/// Known fields serialize under their exact keys in declaration order; any
/// unrecognized keys from the source are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
    #[serde(rename = "databaseURL", default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResolvedConfig {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::ApiKey => &self.api_key,
            Field::AuthDomain => &self.auth_domain,
            Field::ProjectId => &self.project_id,
            Field::StorageBucket => &self.storage_bucket,
            Field::MessagingSenderId => &self.messaging_sender_id,
            Field::AppId => &self.app_id,
            Field::MeasurementId => &self.measurement_id,
            Field::DatabaseUrl => &self.database_url,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::ApiKey => &mut self.api_key,
            Field::AuthDomain => &mut self.auth_domain,
            Field::ProjectId => &mut self.project_id,
            Field::StorageBucket => &mut self.storage_bucket,
            Field::MessagingSenderId => &mut self.messaging_sender_id,
            Field::AppId => &mut self.app_id,
            Field::MeasurementId => &mut self.measurement_id,
            Field::DatabaseUrl => &mut self.database_url,
        }
    }

    /// Converts a validated partial config into the typed record.
    ///
    /// Non-string scalars only get this far when validation is lenient or
    /// disabled; they are written as their string form. Nulls and compound
    /// values in known fields are dropped with a warning.
    pub fn from_partial(partial: &PartialConfig) -> Self {
        let mut resolved = Self::default();

        for (key, value) in partial {
            let Some(field) = Field::from_key(key) else {
                resolved.extra.insert(key.clone(), value.clone());
                continue;
            };

            match scalar_to_string(value) {
                Some(s) => resolved.set(field, s),
                None if value.is_null() => {}
                None => tracing::warn!("Dropping non-scalar value for field {field}"),
            }
        }

        resolved
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> PartialConfig {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_from_partial_maps_fields() {
        let partial = obj(json!({
            "apiKey": "key",
            "databaseURL": "https://db.example.com",
            "custom": {"nested": true},
        }));

        let resolved = ResolvedConfig::from_partial(&partial);
        assert_eq!(resolved.get(Field::ApiKey), Some("key"));
        assert_eq!(resolved.database_url.as_deref(), Some("https://db.example.com"));
        assert_eq!(resolved.get(Field::AppId), None);
        assert_eq!(resolved.extra["custom"], json!({"nested": true}));
    }

    #[test]
    fn test_from_partial_stringifies_scalars() {
        let partial = obj(json!({
            "messagingSenderId": 123456789,
            "appId": false,
            "projectId": null,
            "storageBucket": ["a"],
        }));

        let resolved = ResolvedConfig::from_partial(&partial);
        assert_eq!(resolved.get(Field::MessagingSenderId), Some("123456789"));
        assert_eq!(resolved.get(Field::AppId), Some("false"));
        assert_eq!(resolved.get(Field::ProjectId), None);
        assert_eq!(resolved.get(Field::StorageBucket), None);
    }

    #[test]
    fn test_serializes_exact_keys_in_order() {
        let mut resolved = ResolvedConfig::default();
        resolved.set(Field::DatabaseUrl, "https://db");
        resolved.set(Field::AppId, "app");
        resolved.set(Field::ApiKey, "key");
        resolved.set(Field::AuthDomain, "");

        let json = serde_json::to_string(&resolved).unwrap();
        assert_eq!(
            json,
            r#"{"apiKey":"key","authDomain":"","appId":"app","databaseURL":"https://db"}"#
        );
    }
}

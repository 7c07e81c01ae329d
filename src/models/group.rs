use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable group attributes taken from a submitted form.
///
/// Only `name` and `description` survive; every other key of the raw
/// payload (`_method`, `id`, `_token`, ...) is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl GroupForm {
    pub const FIELDS: [&'static str; 2] = ["name", "description"];

    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self {
            name: payload.get("name").and_then(field_text),
            description: payload.get("description").and_then(field_text),
        }
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
        other => Some(other.to_string()),
    }
}

/// Columns a group data-table can select, order and search on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Name,
    Description,
    Id,
}

impl GroupColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            GroupColumn::Name => "name",
            GroupColumn::Description => "description",
            GroupColumn::Id => "id",
        }
    }

    pub fn is_searchable(self) -> bool {
        !matches!(self, GroupColumn::Id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn transport_keys_are_dropped() {
        let form = GroupForm::from_payload(&payload(json!({
            "name": "Editors",
            "description": "Can edit",
            "_method": "PUT",
            "id": "5",
        })));
        assert_eq!(
            form,
            GroupForm {
                name: Some("Editors".into()),
                description: Some("Can edit".into()),
            }
        );
    }

    #[test]
    fn unknown_keys_never_reach_the_form() {
        let form = GroupForm::from_payload(&payload(json!({
            "name": "Ops",
            "permissions": ["admin"],
            "_token": "abc",
        })));
        assert_eq!(form.name.as_deref(), Some("Ops"));
        assert_eq!(form.description, None);
    }

    #[test]
    fn scalar_values_are_stringified_and_null_is_absent() {
        let form = GroupForm::from_payload(&payload(json!({
            "name": 42,
            "description": null,
        })));
        assert_eq!(form.name.as_deref(), Some("42"));
        assert_eq!(form.description, None);
    }
}

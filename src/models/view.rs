use serde::Serialize;
use serde_json::{Map, Value};

/// A template name plus the data it is rendered with.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct View {
    pub template: String,
    pub context: Map<String, Value>,
}

impl View {
    pub fn make(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            context: Map::new(),
        }
    }

    /// Values that fail to serialize are stored as `null`.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.context.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }
}

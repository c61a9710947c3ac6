use crate::core::value::{FieldValue, Value};
use serde::{Deserialize, Serialize};

/// A normalized record ready to become one persisted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    pub entity: String,
    pub id: i64,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, id: i64, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            id,
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .map(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }
}

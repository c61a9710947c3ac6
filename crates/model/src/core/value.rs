use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    String(String),
    StringArray(Vec<String>),
    Null,
}

impl Value {
    /// Normalizes a decoded JSON value into the shape required by `data_type`.
    ///
    /// Remote payloads are loosely typed: numbers arrive as strings, lists arrive
    /// either as arrays or as comma-separated strings, and absent data arrives as
    /// `null`. Anything that cannot be coerced becomes `Value::Null`.
    pub fn from_json(json: &JsonValue, data_type: DataType) -> Value {
        match data_type {
            DataType::Int => match json {
                JsonValue::Number(n) => n.as_i64().map(Value::Int).unwrap_or(Value::Null),
                JsonValue::String(s) => s.trim().parse().map(Value::Int).unwrap_or(Value::Null),
                _ => Value::Null,
            },
            DataType::String => match json {
                JsonValue::Null => Value::Null,
                JsonValue::String(s) => Value::String(s.clone()),
                JsonValue::Number(n) => Value::String(n.to_string()),
                JsonValue::Bool(b) => Value::String(b.to_string()),
                other => Value::String(other.to_string()),
            },
            DataType::StringArray => match json {
                JsonValue::Array(items) => Value::StringArray(
                    items
                        .iter()
                        .map(|item| match item {
                            JsonValue::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect(),
                ),
                JsonValue::String(s) if s.is_empty() => Value::StringArray(Vec::new()),
                JsonValue::String(s) => {
                    Value::StringArray(s.split(',').map(|p| p.trim().to_string()).collect())
                }
                _ => Value::Null,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::StringArray(v) => write!(f, "{{{}}}", v.join(",")),
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
    pub data_type: DataType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_coercion() {
        assert_eq!(
            Value::from_json(&json!("172"), DataType::String),
            Value::String("172".into())
        );
        assert_eq!(
            Value::from_json(&json!(172), DataType::String),
            Value::String("172".into())
        );
        assert_eq!(Value::from_json(&json!(null), DataType::String), Value::Null);
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(Value::from_json(&json!(42), DataType::Int), Value::Int(42));
        assert_eq!(Value::from_json(&json!(" 7 "), DataType::Int), Value::Int(7));
        assert_eq!(Value::from_json(&json!("unknown"), DataType::Int), Value::Null);
    }

    #[test]
    fn test_array_coercion() {
        assert_eq!(
            Value::from_json(&json!(["a", "b"]), DataType::StringArray),
            Value::StringArray(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            Value::from_json(&json!("a, b,c"), DataType::StringArray),
            Value::StringArray(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(
            Value::from_json(&json!(""), DataType::StringArray),
            Value::StringArray(vec![])
        );
        assert_eq!(
            Value::from_json(&json!({"x": 1}), DataType::StringArray),
            Value::Null
        );
    }
}

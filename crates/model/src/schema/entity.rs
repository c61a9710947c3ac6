use crate::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub data_type: DataType,
}

impl FieldSpec {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Describes the normalized shape of one record kind and the table it lands in.
///
/// The key column always holds the identifier the record was fetched by; the
/// remaining fields are picked out of the remote payload by name, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub table: String,
    pub key_column: String,
    pub fields: Vec<FieldSpec>,
}

impl EntitySchema {
    pub fn new(table: &str, key_column: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            table: table.to_string(),
            key_column: key_column.to_string(),
            fields,
        }
    }

    /// Schema of the `people` resource.
    ///
    /// Height, mass and birth year stay textual since the remote reports
    /// `"unknown"` for some entries.
    pub fn people() -> Self {
        use DataType::{String, StringArray};

        Self::new(
            "people",
            "id",
            vec![
                FieldSpec::new("birth_year", String),
                FieldSpec::new("eye_color", String),
                FieldSpec::new("films", StringArray),
                FieldSpec::new("gender", String),
                FieldSpec::new("hair_color", String),
                FieldSpec::new("height", String),
                FieldSpec::new("homeworld", String),
                FieldSpec::new("mass", String),
                FieldSpec::new("name", String),
                FieldSpec::new("skin_color", String),
                FieldSpec::new("species", StringArray),
                FieldSpec::new("starships", StringArray),
                FieldSpec::new("vehicles", StringArray),
            ],
        )
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Builds a row with exactly this schema's key set from a decoded payload.
    pub fn normalize(&self, id: i64, properties: &Map<String, JsonValue>) -> RowData {
        let field_values = self
            .fields
            .iter()
            .map(|spec| FieldValue {
                name: spec.name.clone(),
                value: properties
                    .get(&spec.name)
                    .map(|json| Value::from_json(json, spec.data_type))
                    .unwrap_or(Value::Null),
                data_type: spec.data_type,
            })
            .collect();

        RowData::new(&self.table, id, field_values)
    }
}

impl Default for EntitySchema {
    fn default() -> Self {
        Self::people()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_keeps_fixed_key_set() {
        let schema = EntitySchema::people();
        let props = json!({
            "name": "Luke Skywalker",
            "height": "172",
            "films": ["A New Hope"],
            "url": "https://www.swapi.tech/api/people/1",
            "created": "2024-01-01T00:00:00.000Z"
        });

        let row = schema.normalize(1, props.as_object().unwrap());

        assert_eq!(row.id, 1);
        assert_eq!(row.entity, "people");
        assert_eq!(row.field_values.len(), schema.fields.len());
        assert_eq!(row.get_value("name"), Value::String("Luke Skywalker".into()));
        assert_eq!(
            row.get_value("films"),
            Value::StringArray(vec!["A New Hope".into()])
        );
        // Absent in payload, present in the row as NULL
        assert_eq!(row.get_value("vehicles"), Value::Null);
        // Present in payload, not part of the schema
        assert!(row.get("url").is_none());
    }
}

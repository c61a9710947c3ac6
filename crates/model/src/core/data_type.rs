use serde::{Deserialize, Serialize};
use std::fmt;

/// Column types a normalized field can be persisted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int,
    String,
    StringArray,
}

impl DataType {
    /// Postgres column type used for this data type.
    pub fn pg_type(&self) -> &'static str {
        match self {
            DataType::Int => "BIGINT",
            DataType::String => "TEXT",
            DataType::StringArray => "TEXT[]",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "int"),
            DataType::String => write!(f, "string"),
            DataType::StringArray => write!(f, "string[]"),
        }
    }
}

use model::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use tokio_postgres::types::ToSql;

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    /// Binds a value; NULLs are typed after the column so the server accepts them.
    pub fn from_value(value: &Value, data_type: DataType) -> Self {
        match value {
            Value::Int(v) => PgParam(Box::new(*v)),
            Value::String(v) => PgParam(Box::new(v.clone())),
            Value::StringArray(v) => PgParam(Box::new(v.clone())),
            Value::Null => match data_type {
                DataType::Int => PgParam(Box::new(Option::<i64>::None)),
                DataType::String => PgParam(Box::new(Option::<String>::None)),
                DataType::StringArray => PgParam(Box::new(Option::<Vec<String>>::None)),
            },
        }
    }

    pub fn from_field(field: &FieldValue) -> Self {
        Self::from_value(&field.value, field.data_type)
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    /// Parameters for one INSERT: the key first, then fields in row order.
    pub fn from_row(row: &RowData) -> Self {
        let mut params = Vec::with_capacity(row.field_values.len() + 1);
        params.push(PgParam(Box::new(row.id)));
        params.extend(row.field_values.iter().map(PgParam::from_field));
        Self { params }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}

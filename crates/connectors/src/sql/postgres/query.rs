use model::schema::entity::EntitySchema;

pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `CREATE TABLE IF NOT EXISTS` for the schema, key column first.
pub fn create_table(schema: &EntitySchema) -> String {
    let mut columns = Vec::with_capacity(schema.fields.len() + 1);
    columns.push(format!(
        "{} BIGINT PRIMARY KEY",
        quote_identifier(&schema.key_column)
    ));
    columns.extend(
        schema
            .fields
            .iter()
            .map(|f| format!("{} {}", quote_identifier(&f.name), f.data_type.pg_type())),
    );

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(&schema.table),
        columns.join(", ")
    )
}

/// Single-row parameterized INSERT; placeholders follow `PgParamStore::from_row`.
pub fn insert_row(schema: &EntitySchema) -> String {
    let names = std::iter::once(schema.key_column.as_str())
        .chain(schema.field_names())
        .map(quote_identifier)
        .collect::<Vec<_>>();
    let placeholders = (1..=names.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(&schema.table),
        names.join(", "),
        placeholders.join(", ")
    )
}

use crate::sql::{
    error::{ConnectorError, DbError},
    postgres::{
        params::PgParamStore,
        query,
        utils::{connect_client, parse_config},
    },
};
use model::{records::row::RowData, schema::entity::EntitySchema};
use std::sync::Arc;
use tokio_postgres::{Client, Config};
use tracing::{debug, info};

/// Postgres access point.
///
/// Holds one long-lived client for setup statements and hands out
/// independent [`PgSession`]s for writes, so concurrent writers never
/// share a connection or a transaction.
#[derive(Clone)]
pub struct PgAdapter {
    config: Arc<Config>,
    client: Arc<Client>,
}

impl PgAdapter {
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let config = parse_config(url)?;
        let client = connect_client(&config).await?;
        Ok(PgAdapter {
            config: Arc::new(config),
            client: Arc::new(client),
        })
    }

    pub async fn exec(&self, sql: &str) -> Result<(), DbError> {
        self.client.batch_execute(sql).await?;
        Ok(())
    }

    /// Idempotent table creation for `schema`.
    pub async fn ensure_table(&self, schema: &EntitySchema) -> Result<(), DbError> {
        let sql = query::create_table(schema);
        debug!(sql = %sql, "Ensuring destination table");
        self.exec(&sql).await?;
        info!(table = %schema.table, "Destination table ready");
        Ok(())
    }

    /// Opens a fresh connection dedicated to one unit of work.
    pub async fn session(&self) -> Result<PgSession, ConnectorError> {
        let client = connect_client(&self.config).await?;
        Ok(PgSession { client })
    }
}

/// A connection owned by a single writer. Dropping it closes the connection.
pub struct PgSession {
    client: Client,
}

impl PgSession {
    /// Inserts `rows` inside one transaction and commits.
    ///
    /// Returns the number of inserted rows. On any error the transaction is
    /// dropped uncommitted, which rolls it back, so either every row lands or
    /// none does. An empty `rows` still commits an empty transaction.
    pub async fn insert_rows(
        &mut self,
        schema: &EntitySchema,
        rows: &[&RowData],
    ) -> Result<u64, DbError> {
        let tx = self.client.transaction().await?;
        let mut inserted = 0u64;

        if !rows.is_empty() {
            let statement = tx.prepare(&query::insert_row(schema)).await?;
            for row in rows {
                if row.entity != schema.table {
                    return Err(DbError::Write(format!(
                        "row {} belongs to '{}', not '{}'",
                        row.id, row.entity, schema.table
                    )));
                }
                let params = PgParamStore::from_row(row);
                inserted += tx.execute(&statement, &params.as_refs()).await?;
            }
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

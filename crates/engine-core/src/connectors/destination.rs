use crate::{
    connectors::sink::BatchSink,
    error::SinkError,
    retry::{RetryError, RetryPolicy, classify_connector_error},
};
use async_trait::async_trait;
use connectors::sql::postgres::adapter::PgAdapter;
use model::{
    records::{batch::Batch, record::FetchedRecord, row::RowData},
    schema::entity::EntitySchema,
};
use std::sync::Arc;
use tracing::debug;

/// Postgres table described by an [`EntitySchema`].
#[derive(Clone)]
pub struct Destination {
    adapter: PgAdapter,
    schema: Arc<EntitySchema>,
    session_retry: RetryPolicy,
}

impl Destination {
    pub fn new(adapter: PgAdapter, schema: Arc<EntitySchema>) -> Self {
        Self {
            adapter,
            schema,
            session_retry: RetryPolicy::for_database(),
        }
    }

    /// Creates the destination table if it does not exist yet.
    pub async fn prepare(&self) -> Result<(), SinkError> {
        self.adapter.ensure_table(&self.schema).await?;
        Ok(())
    }
}

#[async_trait]
impl BatchSink for Destination {
    async fn write_batch(&self, batch: &Batch) -> Result<u64, SinkError> {
        for record in &batch.records {
            match record {
                FetchedRecord::Missing { id } => {
                    debug!(batch_id = %batch.id, id, "Nothing to record for missing id")
                }
                FetchedRecord::Failed { id, .. } => {
                    debug!(batch_id = %batch.id, id, "Skipping failed fetch")
                }
                FetchedRecord::Found(_) => {}
            }
        }

        let rows: Vec<&RowData> = batch.rows().collect();

        // Each batch gets its own connection; the session is dropped on return.
        let mut session = self
            .session_retry
            .run(
                "open session",
                || self.adapter.session(),
                classify_connector_error,
            )
            .await
            .map_err(RetryError::into_inner)?;

        let written = session.insert_rows(&self.schema, &rows).await?;
        Ok(written)
    }
}

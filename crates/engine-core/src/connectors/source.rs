use crate::retry::{RetryError, RetryPolicy, classify_fetch_error};
use async_trait::async_trait;
use connectors::{
    error::FetchError,
    http::{client::ResourceClient, response::ResourcePayload},
};
use model::{records::record::FetchedRecord, schema::entity::EntitySchema};
use std::sync::Arc;
use tracing::{error, info};

/// Anything that can turn an identifier into exactly one [`FetchedRecord`].
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Never fails: errors are isolated into `FetchedRecord::Failed`.
    async fn fetch(&self, id: i64) -> FetchedRecord;
}

/// The remote HTTP resource, normalized through an [`EntitySchema`].
#[derive(Clone)]
pub struct Source {
    client: ResourceClient,
    schema: Arc<EntitySchema>,
    retry: RetryPolicy,
}

impl Source {
    pub fn new(client: ResourceClient, schema: Arc<EntitySchema>, retry: RetryPolicy) -> Self {
        Self {
            client,
            schema,
            retry,
        }
    }

    /// Fetches `id`, retrying transient errors, and surfaces the final error.
    pub async fn try_fetch(&self, id: i64) -> Result<FetchedRecord, FetchError> {
        let payload = self
            .retry
            .run("fetch", || self.client.fetch(id), classify_fetch_error)
            .await
            .map_err(RetryError::into_inner)?;

        Ok(match payload {
            ResourcePayload::Found(properties) => {
                FetchedRecord::Found(self.schema.normalize(id, &properties))
            }
            ResourcePayload::NotFound => {
                info!(id, entity = %self.schema.table, "Record not found");
                FetchedRecord::Missing { id }
            }
        })
    }
}

#[async_trait]
impl RecordSource for Source {
    async fn fetch(&self, id: i64) -> FetchedRecord {
        match self.try_fetch(id).await {
            Ok(record) => record,
            Err(err) => {
                error!(id, url = %self.client.url_for(id), error = %err, "Fetch failed");
                FetchedRecord::Failed {
                    id,
                    reason: err.to_string(),
                }
            }
        }
    }
}

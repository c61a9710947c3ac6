use crate::error::IngestError;
use connectors::{http::client::ResourceClient, sql::postgres::adapter::PgAdapter};
use engine_config::settings::IngestSettings;
use engine_core::{
    connectors::{destination::Destination, source::Source},
    retry::RetryPolicy,
};
use model::schema::entity::EntitySchema;
use std::{sync::Arc, time::Duration};

const FETCH_BASE_DELAY: Duration = Duration::from_millis(200);
const FETCH_MAX_DELAY: Duration = Duration::from_secs(2);

pub fn create_source(
    settings: &IngestSettings,
    schema: Arc<EntitySchema>,
) -> Result<Source, IngestError> {
    let client = ResourceClient::new(&settings.resource_url, settings.fetch_timeout)?;
    let retry = RetryPolicy::new(
        settings.fetch_max_attempts,
        FETCH_BASE_DELAY,
        FETCH_MAX_DELAY,
    );
    Ok(Source::new(client, schema, retry))
}

/// Connects to Postgres and makes sure the destination table exists.
pub async fn create_destination(
    settings: &IngestSettings,
    schema: Arc<EntitySchema>,
) -> Result<Destination, IngestError> {
    let adapter = PgAdapter::connect(&settings.database_url).await?;
    let destination = Destination::new(adapter, schema);
    destination.prepare().await?;
    Ok(destination)
}

use connectors::{
    error::FetchError,
    sql::error::{ConnectorError, DbError},
};
use engine_config::settings::error::SettingsError;
use engine_core::error::SinkError;
use thiserror::Error;

/// Failures that stop a run before any record is fetched.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to build the resource client: {0}")]
    Client(#[from] FetchError),

    #[error("Failed to connect to the database: {0}")]
    Connection(#[from] ConnectorError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Failed to prepare the destination: {0}")]
    Destination(#[from] SinkError),
}

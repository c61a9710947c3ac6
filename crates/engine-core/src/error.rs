use connectors::sql::error::{ConnectorError, DbError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Failed to open a database session: {0}")]
    Session(#[from] ConnectorError),

    #[error("Sink error: {0}")]
    Other(String),
}

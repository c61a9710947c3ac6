use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any Postgres driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Writing rows to the database failed at the application level.
    #[error("Write error: {0}")]
    Write(String),
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection string: {0}")]
    InvalidUrl(String),

    #[error("Connection failed: {0}")]
    Connection(#[from] tokio_postgres::Error),

    #[error("TLS configuration failed: {0}")]
    TlsConfig(#[from] native_tls::Error),
}

impl DbError {
    /// SQLSTATE of the underlying server error, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            DbError::Postgres(err) => err.code().map(|c| c.code()),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.sql_state() == Some("23505")
    }
}

use engine_core::error::SinkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsumerError {
    #[error("Failed to write batch '{batch_id}': {source}")]
    Write {
        batch_id: String,
        #[source]
        source: SinkError,
    },

    #[error("Write task for batch '{batch_id}' panicked")]
    TaskPanicked { batch_id: String },

    #[error("Write task for batch '{batch_id}' was cancelled")]
    TaskCancelled { batch_id: String },
}

impl ConsumerError {
    pub fn batch_id(&self) -> &str {
        match self {
            ConsumerError::Write { batch_id, .. }
            | ConsumerError::TaskPanicked { batch_id }
            | ConsumerError::TaskCancelled { batch_id } => batch_id,
        }
    }
}

use crate::error::SinkError;
use async_trait::async_trait;
use model::records::batch::Batch;

#[async_trait]
pub trait BatchSink: Send + Sync {
    /// Persists every found row of `batch` atomically and returns the row count.
    ///
    /// Missing and failed entries contribute nothing. A batch without found
    /// rows still succeeds with `0`.
    async fn write_batch(&self, batch: &Batch) -> Result<u64, SinkError>;
}

use crate::error::ConsumerError;
use engine_core::{connectors::sink::BatchSink, metrics::Metrics};
use model::records::batch::Batch;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct WriteResult {
    pub batch_id: String,
    pub rows_written: u64,
    pub duration: Duration,
}

/// Persists one batch through a [`BatchSink`] and records the outcome.
///
/// Writes are never retried. The sink commits or rolls back the whole batch.
#[derive(Clone)]
pub struct BatchWriter {
    sink: Arc<dyn BatchSink>,
    metrics: Metrics,
}

impl BatchWriter {
    pub fn new(sink: Arc<dyn BatchSink>, metrics: Metrics) -> Self {
        Self { sink, metrics }
    }

    pub async fn write(&self, batch: &Batch) -> Result<WriteResult, ConsumerError> {
        let start = Instant::now();
        let (first_id, last_id) = batch.id_span().unzip();

        info!(
            batch_id = %batch.id,
            records = batch.len(),
            rows = batch.row_count(),
            first_id = ?first_id,
            last_id = ?last_id,
            "Writing batch"
        );

        match self.sink.write_batch(batch).await {
            Ok(rows_written) => {
                let duration = start.elapsed();
                self.metrics.increment_rows(rows_written);
                self.metrics.increment_committed();

                info!(
                    batch_id = %batch.id,
                    rows = rows_written,
                    skipped = (batch.len() as u64).saturating_sub(rows_written),
                    duration_ms = duration.as_millis(),
                    "Batch committed"
                );

                Ok(WriteResult {
                    batch_id: batch.id.clone(),
                    rows_written,
                    duration,
                })
            }
            Err(source) => {
                self.metrics.increment_failed_batches();
                error!(
                    batch_id = %batch.id,
                    first_id = ?first_id,
                    last_id = ?last_id,
                    error = %source,
                    "Batch write failed, transaction rolled back"
                );
                Err(ConsumerError::Write {
                    batch_id: batch.id.clone(),
                    source,
                })
            }
        }
    }
}

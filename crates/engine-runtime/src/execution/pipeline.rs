use engine_core::{
    connectors::{sink::BatchSink, source::RecordSource},
    metrics::Metrics,
};
use engine_processing::{
    batcher::into_batches,
    consumer::{
        dispatcher::{DispatchReport, WriteDispatcher},
        writer::BatchWriter,
    },
    producer::rounds::RoundScheduler,
};
use futures::StreamExt;
use model::records::range::IdRange;
use std::{pin::pin, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Fetch rounds feed the batcher, every batch is dispatched as soon as it is
/// formed, and all writes are joined before returning.
pub struct IngestPipeline {
    source: Arc<dyn RecordSource>,
    sink: Arc<dyn BatchSink>,
    round_size: usize,
    batch_size: usize,
    metrics: Metrics,
    cancel: CancellationToken,
}

impl IngestPipeline {
    pub fn new(
        source: Arc<dyn RecordSource>,
        sink: Arc<dyn BatchSink>,
        round_size: usize,
        batch_size: usize,
        metrics: Metrics,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            sink,
            round_size,
            batch_size,
            metrics,
            cancel,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub async fn run(&self, range: IdRange) -> DispatchReport {
        info!(
            start = range.start,
            end = range.end,
            round_size = self.round_size,
            batch_size = self.batch_size,
            "Starting ingestion pipeline"
        );

        let scheduler = RoundScheduler::new(
            Arc::clone(&self.source),
            self.round_size,
            self.metrics.clone(),
            self.cancel.clone(),
        );
        let writer = BatchWriter::new(Arc::clone(&self.sink), self.metrics.clone());
        let mut dispatcher = WriteDispatcher::new(writer, self.metrics.clone());

        let mut batches = pin!(into_batches(scheduler.stream(range), self.batch_size));
        while let Some(batch) = batches.next().await {
            dispatcher.launch(batch);
        }

        let report = dispatcher.join().await;
        info!(
            batches = report.outcomes.len(),
            rows = report.rows_written(),
            "All write tasks joined"
        );
        report
    }
}

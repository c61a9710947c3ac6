use crate::{
    consumer::writer::{BatchWriter, WriteResult},
    error::ConsumerError,
};
use engine_core::metrics::Metrics;
use model::records::batch::Batch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum BatchResult {
    Committed { rows: u64 },
    Failed { error: String },
}

/// What happened to one dispatched batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub batch_id: String,
    pub seq: usize,
    pub first_id: Option<i64>,
    pub last_id: Option<i64>,
    /// Identifiers in the batch whose fetch failed; never persisted.
    pub failed_ids: Vec<i64>,
    pub missing_ids: Vec<i64>,
    pub result: BatchResult,
}

impl BatchOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self.result, BatchResult::Committed { .. })
    }
}

/// One outcome per launched batch, in launch order.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl DispatchReport {
    pub fn committed(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| o.is_committed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_committed())
    }

    pub fn rows_written(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o.result {
                BatchResult::Committed { rows } => rows,
                BatchResult::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

struct Dispatched {
    batch_id: String,
    seq: usize,
    span: Option<(i64, i64)>,
    failed_ids: Vec<i64>,
    missing_ids: Vec<i64>,
    handle: JoinHandle<Result<WriteResult, ConsumerError>>,
}

/// Spawns one write task per batch and owns every handle until joined.
///
/// `launch` never waits on a write. `join` consumes the dispatcher, so no
/// handle can outlive it.
pub struct WriteDispatcher {
    writer: BatchWriter,
    metrics: Metrics,
    tasks: Vec<Dispatched>,
}

impl WriteDispatcher {
    pub fn new(writer: BatchWriter, metrics: Metrics) -> Self {
        Self {
            writer,
            metrics,
            tasks: Vec::new(),
        }
    }

    pub fn launch(&mut self, batch: Batch) {
        debug!(batch_id = %batch.id, records = batch.len(), "Dispatching write task");

        let batch_id = batch.id.clone();
        let seq = batch.seq;
        let span = batch.id_span();
        let failed_ids = batch.failed_ids();
        let missing_ids = batch.missing_ids();

        let writer = self.writer.clone();
        let handle = tokio::spawn(async move { writer.write(&batch).await });
        self.metrics.increment_dispatched();

        self.tasks.push(Dispatched {
            batch_id,
            seq,
            span,
            failed_ids,
            missing_ids,
            handle,
        });
    }

    /// Number of launched, not yet joined tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits for every launched task.
    pub async fn join(self) -> DispatchReport {
        info!(tasks = self.tasks.len(), "Waiting for write tasks");

        let mut outcomes = Vec::with_capacity(self.tasks.len());
        for task in self.tasks {
            let result = match task.handle.await {
                Ok(Ok(written)) => BatchResult::Committed {
                    rows: written.rows_written,
                },
                Ok(Err(err)) => BatchResult::Failed {
                    error: err.to_string(),
                },
                Err(join_err) => {
                    let err = if join_err.is_panic() {
                        ConsumerError::TaskPanicked {
                            batch_id: task.batch_id.clone(),
                        }
                    } else {
                        ConsumerError::TaskCancelled {
                            batch_id: task.batch_id.clone(),
                        }
                    };
                    self.metrics.increment_failed_batches();
                    error!(batch_id = %task.batch_id, error = %err, "Write task did not finish");
                    BatchResult::Failed {
                        error: err.to_string(),
                    }
                }
            };

            let (first_id, last_id) = task.span.unzip();
            outcomes.push(BatchOutcome {
                batch_id: task.batch_id,
                seq: task.seq,
                first_id,
                last_id,
                failed_ids: task.failed_ids,
                missing_ids: task.missing_ids,
                result,
            });
        }

        DispatchReport { outcomes }
    }
}

use crate::{
    error::IngestError,
    execution::{
        factory::{create_destination, create_source},
        pipeline::IngestPipeline,
    },
};
use chrono::{DateTime, Utc};
use engine_config::{
    report::summary::{FailedBatch, RunSummary, SummaryParams},
    settings::IngestSettings,
};
use engine_core::metrics::Metrics;
use engine_processing::consumer::dispatcher::{BatchResult, DispatchReport};
use model::{records::range::IdRange, schema::entity::EntitySchema};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

pub async fn run(
    settings: IngestSettings,
    cancel: CancellationToken,
) -> Result<RunSummary, IngestError> {
    IngestExecutor::new(settings, cancel).await?.execute().await
}

struct IngestExecutor {
    settings: IngestSettings,
    cancel: CancellationToken,
    run_id: Uuid,
    pipeline: IngestPipeline,
}

impl IngestExecutor {
    async fn new(settings: IngestSettings, cancel: CancellationToken) -> Result<Self, IngestError> {
        settings.validate()?;

        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, url = %settings.resource_url, "Initializing ingestion run");

        let schema = Arc::new(EntitySchema::people());
        let source = create_source(&settings, Arc::clone(&schema))?;
        let destination = create_destination(&settings, schema).await?;

        let pipeline = IngestPipeline::new(
            Arc::new(source),
            Arc::new(destination),
            settings.round_size,
            settings.batch_size,
            Metrics::new(),
            cancel.clone(),
        );

        Ok(Self {
            settings,
            cancel,
            run_id,
            pipeline,
        })
    }

    async fn execute(self) -> Result<RunSummary, IngestError> {
        let started_at = Utc::now();
        let report = self.pipeline.run(self.settings.range).await;

        if self.cancel.is_cancelled() {
            info!(run_id = %self.run_id, "Shutdown requested during run");
        }

        Ok(summarize(
            self.run_id,
            started_at,
            self.settings.range,
            &report,
            self.pipeline.metrics(),
        ))
    }
}

/// Folds the joined batch outcomes into a [`RunSummary`].
///
/// The run counts as cancelled only when some identifier of `range` was never
/// fetched; a signal that lands after the last round changes nothing.
pub fn summarize(
    run_id: Uuid,
    started_at: DateTime<Utc>,
    range: IdRange,
    report: &DispatchReport,
    metrics: &Metrics,
) -> RunSummary {
    let snapshot = metrics.snapshot();
    let cancelled = snapshot.records_fetched < range.len() as u64;

    let failed_batches = report
        .outcomes
        .iter()
        .filter_map(|outcome| match &outcome.result {
            BatchResult::Failed { error } => Some(FailedBatch {
                batch_id: outcome.batch_id.clone(),
                seq: outcome.seq,
                first_id: outcome.first_id,
                last_id: outcome.last_id,
                error: error.clone(),
            }),
            BatchResult::Committed { .. } => None,
        })
        .collect();

    let failed_ids = report
        .outcomes
        .iter()
        .flat_map(|o| o.failed_ids.iter().copied())
        .collect();
    let missing_ids = report
        .outcomes
        .iter()
        .flat_map(|o| o.missing_ids.iter().copied())
        .collect();

    RunSummary::new(SummaryParams {
        run_id,
        started_at,
        metrics: snapshot,
        failed_batches,
        failed_ids,
        missing_ids,
        cancelled,
    })
}

use chrono::{DateTime, Utc};
use engine_core::metrics::MetricsSnapshot;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    CompletedWithFailures,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedBatch {
    pub batch_id: String,
    pub seq: usize,
    pub first_id: Option<i64>,
    pub last_id: Option<i64>,
    pub error: String,
}

pub struct SummaryParams {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub metrics: MetricsSnapshot,
    pub failed_batches: Vec<FailedBatch>,
    pub failed_ids: Vec<i64>,
    pub missing_ids: Vec<i64>,
    /// Some identifiers of the range were never fetched.
    pub cancelled: bool,
}

/// Final account of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub metrics: MetricsSnapshot,
    pub failed_batches: Vec<FailedBatch>,
    pub failed_ids: Vec<i64>,
    pub missing_ids: Vec<i64>,
}

impl RunSummary {
    pub fn new(params: SummaryParams) -> Self {
        let finished_at = Utc::now();
        let duration_ms = (finished_at - params.started_at)
            .num_milliseconds()
            .max(0) as u64;

        // Lost data outranks an interrupted run.
        let status = if !params.failed_batches.is_empty() || !params.failed_ids.is_empty() {
            RunStatus::CompletedWithFailures
        } else if params.cancelled {
            RunStatus::Cancelled
        } else {
            RunStatus::Succeeded
        };

        let mut failed_ids = params.failed_ids;
        failed_ids.sort_unstable();
        let mut missing_ids = params.missing_ids;
        missing_ids.sort_unstable();
        let mut failed_batches = params.failed_batches;
        failed_batches.sort_by_key(|b| b.seq);

        Self {
            run_id: params.run_id,
            status,
            started_at: params.started_at,
            finished_at,
            duration_ms,
            metrics: params.metrics,
            failed_batches,
            failed_ids,
            missing_ids,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Succeeded
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }

    /// Emits the human-readable summary and one JSON line.
    pub fn log(&self) {
        info!(
            run_id = %self.run_id,
            status = ?self.status,
            duration_ms = self.duration_ms,
            fetched = self.metrics.records_fetched,
            missing = self.metrics.records_missing,
            rows_written = self.metrics.rows_written,
            batches_committed = self.metrics.batches_committed,
            "Ingestion finished"
        );

        for batch in &self.failed_batches {
            error!(
                batch_id = %batch.batch_id,
                first_id = ?batch.first_id,
                last_id = ?batch.last_id,
                error = %batch.error,
                "Batch was not persisted"
            );
        }

        if !self.failed_ids.is_empty() {
            warn!(ids = ?self.failed_ids, "Identifiers could not be fetched");
        }

        info!(summary = %self.to_json(), "Run summary");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SummaryParams {
        SummaryParams {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            metrics: MetricsSnapshot::default(),
            failed_batches: vec![],
            failed_ids: vec![],
            missing_ids: vec![],
            cancelled: false,
        }
    }

    #[test]
    fn test_clean_run_succeeds() {
        let summary = RunSummary::new(params());
        assert_eq!(summary.status, RunStatus::Succeeded);
        assert!(summary.is_success());
    }

    #[test]
    fn test_failed_batch_marks_run() {
        let mut p = params();
        p.failed_batches = vec![
            FailedBatch {
                batch_id: "batch-0003".into(),
                seq: 3,
                first_id: Some(21),
                last_id: Some(24),
                error: "boom".into(),
            },
            FailedBatch {
                batch_id: "batch-0001".into(),
                seq: 1,
                first_id: Some(1),
                last_id: Some(10),
                error: "boom".into(),
            },
        ];
        let summary = RunSummary::new(p);
        assert_eq!(summary.status, RunStatus::CompletedWithFailures);
        assert_eq!(summary.failed_batches[0].seq, 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_failed_fetch_marks_run() {
        let mut p = params();
        p.failed_ids = vec![9, 4];
        let summary = RunSummary::new(p);
        assert_eq!(summary.status, RunStatus::CompletedWithFailures);
        assert_eq!(summary.failed_ids, vec![4, 9]);
    }

    #[test]
    fn test_cancelled_run_without_failures() {
        let mut p = params();
        p.cancelled = true;
        assert_eq!(RunSummary::new(p).status, RunStatus::Cancelled);
    }

    #[test]
    fn test_failures_outrank_cancellation() {
        let mut p = params();
        p.cancelled = true;
        p.failed_ids = vec![1];
        let summary = RunSummary::new(p);
        assert_eq!(summary.status, RunStatus::CompletedWithFailures);
        assert_eq!(summary.failed_ids, vec![1]);
    }

    #[test]
    fn test_json_shape() {
        let summary = RunSummary::new(params());
        let json: serde_json::Value = serde_json::from_str(&summary.to_json()).unwrap();
        assert_eq!(json["status"], "succeeded");
        assert!(json["metrics"]["rows_written"].is_u64());
    }
}

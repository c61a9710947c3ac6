use engine_core::{connectors::source::RecordSource, metrics::Metrics};
use futures::{
    Stream, StreamExt,
    future::{self, join_all},
    stream,
};
use model::records::{range::IdRange, record::FetchedRecord};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Fetches an identifier range in strictly sequential rounds.
///
/// Each round launches at most `round_size` fetches at once and waits for all
/// of them before the next round starts. Records leave the stream in
/// identifier order, whatever order the fetches completed in.
pub struct RoundScheduler {
    source: Arc<dyn RecordSource>,
    round_size: usize,
    metrics: Metrics,
    cancel: CancellationToken,
}

impl RoundScheduler {
    pub fn new(
        source: Arc<dyn RecordSource>,
        round_size: usize,
        metrics: Metrics,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            round_size: round_size.max(1),
            metrics,
            cancel,
        }
    }

    /// Lazy stream of one [`FetchedRecord`] per identifier in `range`.
    ///
    /// Nothing is fetched until the stream is polled. Once the cancellation
    /// token fires no further round starts; the round in progress is still
    /// emitted in full.
    pub fn stream(&self, range: IdRange) -> impl Stream<Item = FetchedRecord> + Send + 'static {
        let total = range.round_count(self.round_size);
        let source = Arc::clone(&self.source);
        let metrics = self.metrics.clone();
        let cancel = self.cancel.clone();

        stream::iter(range.rounds(self.round_size).enumerate())
            .take_while(move |(idx, _)| {
                let stop = cancel.is_cancelled();
                if stop {
                    info!(round = idx + 1, of = total, "Cancelled, not starting round");
                }
                future::ready(!stop)
            })
            .then(move |(idx, ids)| {
                let source = Arc::clone(&source);
                let metrics = metrics.clone();
                async move {
                    debug!(
                        round = idx + 1,
                        of = total,
                        first_id = ids.start,
                        last_id = ids.end - 1,
                        "Starting fetch round"
                    );

                    // join_all yields results in input order, not completion order.
                    let records = join_all(ids.map(|id| source.fetch(id))).await;

                    for record in &records {
                        match record {
                            FetchedRecord::Found(_) => metrics.record_found(),
                            FetchedRecord::Missing { .. } => metrics.record_missing(),
                            FetchedRecord::Failed { .. } => metrics.record_fetch_failure(),
                        }
                    }

                    debug!(round = idx + 1, fetched = records.len(), "Fetch round complete");
                    records
                }
            })
            .flat_map(stream::iter)
    }
}

use futures::{Stream, StreamExt};
use model::records::{batch::Batch, record::FetchedRecord};

/// Re-chunks `source` into vectors of `size` items.
///
/// Every chunk is full except possibly the last, which is never empty. An
/// empty source yields nothing. Order is preserved and nothing is dropped or
/// repeated.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn batches<S>(source: S, size: usize) -> impl Stream<Item = Vec<S::Item>>
where
    S: Stream,
{
    source.chunks(size)
}

/// Groups fetched records into sequenced [`Batch`]es, numbered from 1.
pub fn into_batches<S>(records: S, size: usize) -> impl Stream<Item = Batch>
where
    S: Stream<Item = FetchedRecord>,
{
    batches(records, size)
        .enumerate()
        .map(|(idx, records)| Batch::new(idx + 1, records))
}

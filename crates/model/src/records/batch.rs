use crate::records::{record::FetchedRecord, row::RowData};

/// Unit of persistence work: a contiguous slice of the fetched-record stream.
#[derive(Debug, Clone)]
pub struct Batch {
    pub id: String,
    /// 1-based position in emission order.
    pub seq: usize,
    pub records: Vec<FetchedRecord>,
}

impl Batch {
    pub fn new(seq: usize, records: Vec<FetchedRecord>) -> Self {
        Self {
            id: batch_id(seq),
            seq,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows that will actually be persisted.
    pub fn rows(&self) -> impl Iterator<Item = &RowData> {
        self.records.iter().filter_map(FetchedRecord::row)
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    pub fn missing_ids(&self) -> Vec<i64> {
        self.records
            .iter()
            .filter(|r| r.is_missing())
            .map(FetchedRecord::id)
            .collect()
    }

    pub fn failed_ids(&self) -> Vec<i64> {
        self.records
            .iter()
            .filter(|r| r.is_failed())
            .map(FetchedRecord::id)
            .collect()
    }

    /// Inclusive identifier span covered by this batch, if any.
    pub fn id_span(&self) -> Option<(i64, i64)> {
        let first = self.records.first()?.id();
        let last = self.records.last()?.id();
        Some((first, last))
    }
}

pub fn batch_id(seq: usize) -> String {
    format!("batch-{seq:04}")
}

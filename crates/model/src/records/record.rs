use crate::records::row::RowData;
use serde::{Deserialize, Serialize};

/// Outcome of fetching a single identifier.
///
/// Every identifier in a run yields exactly one of these, so the stream can be
/// counted and re-segmented without consulting the remote again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchedRecord {
    /// The remote had data; holds the normalized row.
    Found(RowData),
    /// The remote reported no data for this identifier.
    Missing { id: i64 },
    /// The fetch failed and was isolated to this identifier.
    Failed { id: i64, reason: String },
}

impl FetchedRecord {
    pub fn id(&self) -> i64 {
        match self {
            FetchedRecord::Found(row) => row.id,
            FetchedRecord::Missing { id } | FetchedRecord::Failed { id, .. } => *id,
        }
    }

    pub fn row(&self) -> Option<&RowData> {
        match self {
            FetchedRecord::Found(row) => Some(row),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FetchedRecord::Missing { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchedRecord::Failed { .. })
    }
}

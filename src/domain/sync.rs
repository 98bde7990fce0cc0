//! Bookkeeping for keyed bulk synchronization.
//!
//! Every chunk is recorded independently so a failed chunk can be located and
//! retried from its index range without re-reading the log of the whole run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Default number of records per upsert call
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Split `len` records into consecutive ranges of at most `chunk_size`.
///
/// A `chunk_size` of zero is treated as one record per chunk.
pub fn plan_chunks(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    let size = chunk_size.max(1);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Outcome of one upsert call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkResult {
    pub range_start: usize,
    pub range_end: usize,
    pub success: bool,
    pub error: Option<String>,
}

impl ChunkResult {
    pub fn succeeded(range: &Range<usize>) -> Self {
        Self {
            range_start: range.start,
            range_end: range.end,
            success: true,
            error: None,
        }
    }

    pub fn failed(range: &Range<usize>, error: impl Into<String>) -> Self {
        Self {
            range_start: range.start,
            range_end: range.end,
            success: false,
            error: Some(error.into()),
        }
    }

    pub const fn len(&self) -> usize {
        self.range_end - self.range_start
    }

    pub const fn is_empty(&self) -> bool {
        self.range_end == self.range_start
    }
}

impl fmt::Display for ChunkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "[{}, {}) ok", self.range_start, self.range_end),
            Some(e) => write!(f, "[{}, {}) failed: {}", self.range_start, self.range_end, e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Templates,
    Vehicles,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Templates => f.write_str("templates"),
            Self::Vehicles => f.write_str("vehicles"),
        }
    }
}

/// Aggregate result of pushing one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub dataset: Dataset,
    pub table: String,
    pub total_records: usize,
    pub chunks: Vec<ChunkResult>,
    /// Set when the dataset could not be loaded or mapped; no chunk was attempted
    pub load_error: Option<String>,
}

impl DatasetReport {
    pub fn new(dataset: Dataset, table: impl Into<String>, total_records: usize) -> Self {
        Self {
            dataset,
            table: table.into(),
            total_records,
            chunks: Vec::new(),
            load_error: None,
        }
    }

    pub fn load_failed(dataset: Dataset, table: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            load_error: Some(error.into()),
            ..Self::new(dataset, table, 0)
        }
    }

    pub fn record(&mut self, chunk: ChunkResult) {
        self.chunks.push(chunk);
    }

    /// Loaded and every attempted chunk succeeded
    pub fn is_success(&self) -> bool {
        self.load_error.is_none() && self.chunks.iter().all(|c| c.success)
    }

    pub fn failed_chunks(&self) -> impl Iterator<Item = &ChunkResult> {
        self.chunks.iter().filter(|c| !c.success)
    }

    pub fn records_pushed(&self) -> usize {
        self.chunks.iter().filter(|c| c.success).map(ChunkResult::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub templates: DatasetReport,
    pub vehicles: DatasetReport,
}

impl SyncSummary {
    /// Neither dataset was attempted, e.g. the remote store is not configured
    pub fn abandoned(templates_table: &str, vehicles_table: &str, reason: &str) -> Self {
        Self {
            templates: DatasetReport::load_failed(Dataset::Templates, templates_table, reason),
            vehicles: DatasetReport::load_failed(Dataset::Vehicles, vehicles_table, reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.templates.is_success() && self.vehicles.is_success()
    }
}

//! Deduplicated vehicle catalog keyed by vehicle id.
//!
//! Rows are ingested in document order. The first row carrying an id fixes every
//! descriptive field of the record; later rows with the same id only contribute
//! version labels that have not been seen yet.

use serde_json::Map;
use std::collections::HashMap;
use tracing::debug;

use super::classification::Classification;
use super::vehicle::VehicleRecord;
use super::vehicle_id::DetailLink;

/// A row that passed identity resolution and classification
#[derive(Debug, Clone)]
pub struct ResolvedRow {
    pub link: DetailLink,
    pub name: String,
    pub brand: String,
    pub raw_type: String,
    pub version: String,
    pub classification: Classification,
}

/// What happened to a row handed to [`VehicleCatalog::ingest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// First occurrence of the id
    Created,
    /// Known id, version label appended
    VersionAdded,
    /// Known id and known version
    Duplicate,
}

#[derive(Debug, Default, Clone)]
pub struct VehicleCatalog {
    records: Vec<VehicleRecord>,
    index: HashMap<String, usize>,
}

impl VehicleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, row: ResolvedRow) -> IngestOutcome {
        if let Some(&position) = self.index.get(&row.link.id) {
            let record = &mut self.records[position];
            return if record.add_version(&row.version) {
                debug!("Merged version '{}' into {}", row.version, record.id);
                IngestOutcome::VersionAdded
            } else {
                IngestOutcome::Duplicate
            };
        }

        let record = VehicleRecord {
            id: row.link.id.clone(),
            name: row.name,
            brand: row.brand,
            vehicle_type: row.raw_type,
            template_id: row.classification.template_id.clone(),
            tags: row.classification.tag_names(),
            detail_url: row.link.url,
            versions: vec![row.version],
            specs: Map::new(),
        };

        self.index.insert(row.link.id, self.records.len());
        self.records.push(record);
        IngestOutcome::Created
    }

    pub fn get(&self, id: &str) -> Option<&VehicleRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in order of first appearance
    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VehicleRecord> {
        self.records
    }
}

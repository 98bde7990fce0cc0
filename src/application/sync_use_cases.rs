//! Catalog synchronization use case
//!
//! Pushes the maintenance templates and the vehicle catalog into the remote
//! store. The two datasets are independent steps: templates go first as one
//! batch, vehicles follow in fixed-size chunks. Every failure is recorded in the
//! [`SyncSummary`] and the run continues.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::{
    ChunkResult, Dataset, DatasetReport, MaintenanceTemplate, SyncSummary, VehicleRecord, plan_chunks,
};
use crate::infrastructure::catalog_store;
use crate::infrastructure::config::SyncConfig;
use crate::infrastructure::field_mapper::{self, to_json_rows};
use crate::infrastructure::remote_store::RemoteStore;

pub struct CatalogSynchronizer {
    store: Arc<dyn RemoteStore>,
    config: SyncConfig,
}

impl CatalogSynchronizer {
    pub fn new(store: Arc<dyn RemoteStore>, config: SyncConfig) -> Self {
        Self { store, config }
    }

    /// Push all templates as a single upsert call
    pub async fn push_templates(&self, templates: &[MaintenanceTemplate]) -> DatasetReport {
        let rows = field_mapper::template_rows(templates);
        self.push_rows(Dataset::Templates, &self.config.templates_table, &rows, rows.len())
            .await
    }

    /// Push vehicles in consecutive chunks of `chunk_size`
    pub async fn push_vehicles(&self, vehicles: &[VehicleRecord]) -> DatasetReport {
        let rows = field_mapper::vehicle_rows(vehicles);
        self.push_rows(Dataset::Vehicles, &self.config.vehicles_table, &rows, self.config.chunk_size)
            .await
    }

    async fn push_rows<T: Serialize>(
        &self,
        dataset: Dataset,
        table: &str,
        rows: &[T],
        chunk_size: usize,
    ) -> DatasetReport {
        let mut report = DatasetReport::new(dataset, table, rows.len());
        if rows.is_empty() {
            info!("No {} to push", dataset);
            return report;
        }

        let chunks = plan_chunks(rows.len(), chunk_size);
        info!("🚀 Pushing {} {} to '{}' in {} chunk(s)", rows.len(), dataset, table, chunks.len());

        for range in chunks {
            let result = match to_json_rows(&rows[range.clone()]) {
                Ok(payload) => self.store.upsert(table, &payload).await.map_err(|e| e.to_string()),
                Err(e) => Err(format!("Failed to serialize rows: {e}")),
            };

            let chunk = match result {
                Ok(()) => {
                    info!("✅ {} [{}, {}) upserted", dataset, range.start, range.end);
                    ChunkResult::succeeded(&range)
                }
                Err(message) => {
                    error!("❌ {} [{}, {}) failed: {}", dataset, range.start, range.end, message);
                    ChunkResult::failed(&range, message)
                }
            };
            report.record(chunk);
        }

        report
    }

    pub async fn sync_templates_file(&self) -> DatasetReport {
        let path = &self.config.templates_file;
        match catalog_store::read_templates(path) {
            Ok(templates) => self.push_templates(&templates).await,
            Err(e) => {
                warn!("⚠️ Skipping templates: {}", e);
                DatasetReport::load_failed(Dataset::Templates, &self.config.templates_table, e.to_string())
            }
        }
    }

    pub async fn sync_vehicles_file(&self) -> DatasetReport {
        let path = &self.config.vehicles_catalog;
        match catalog_store::read_vehicles(path) {
            Ok(vehicles) => self.push_vehicles(&vehicles).await,
            Err(e) => {
                warn!("⚠️ Skipping vehicles: {}", e);
                DatasetReport::load_failed(Dataset::Vehicles, &self.config.vehicles_table, e.to_string())
            }
        }
    }

    /// Templates first, then vehicles; a failed templates push does not block vehicles
    pub async fn run(&self) -> SyncSummary {
        let templates = self.sync_templates_file().await;
        let vehicles = self.sync_vehicles_file().await;
        SyncSummary { templates, vehicles }
    }
}

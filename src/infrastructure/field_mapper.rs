//! Column mapping between catalog records and remote table rows
//!
//! Both datasets keep a stable column set across a batch: optional text fields
//! are sent as empty strings rather than omitted.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{MaintenanceTemplate, VehicleRecord};

/// Row of the `maintenance_templates` table; the template key becomes `id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub items: Value,
}

/// Row of the `vehicles` table; the template reference stays `template_id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRow {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub template_id: String,
    pub tags: Vec<String>,
    pub detail_url: String,
    pub versions: Vec<String>,
    pub specs: Map<String, Value>,
}

impl From<&MaintenanceTemplate> for TemplateRow {
    fn from(template: &MaintenanceTemplate) -> Self {
        Self {
            id: template.template_id.clone(),
            name: template.template_name.clone(),
            description: template.description.clone().unwrap_or_default(),
            items: template.maintenance_items.clone(),
        }
    }
}

impl From<&VehicleRecord> for VehicleRow {
    fn from(vehicle: &VehicleRecord) -> Self {
        Self {
            id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            brand: vehicle.brand.clone(),
            vehicle_type: vehicle.vehicle_type.clone(),
            template_id: vehicle.template_id.clone(),
            tags: vehicle.tags.clone(),
            detail_url: vehicle.detail_url.clone(),
            versions: vehicle.versions.clone(),
            specs: vehicle.specs.clone(),
        }
    }
}

pub fn template_rows(templates: &[MaintenanceTemplate]) -> Vec<TemplateRow> {
    templates.iter().map(TemplateRow::from).collect()
}

pub fn vehicle_rows(vehicles: &[VehicleRecord]) -> Vec<VehicleRow> {
    vehicles.iter().map(VehicleRow::from).collect()
}

/// Serialize mapped rows into the JSON objects sent in an upsert body
pub fn to_json_rows<T: Serialize>(rows: &[T]) -> serde_json::Result<Vec<Value>> {
    rows.iter().map(serde_json::to_value).collect()
}

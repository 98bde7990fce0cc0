use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maintenance schedule definition referenced by vehicles through `template_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTemplate {
    pub template_id: String,
    pub template_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Opaque schedule payload, stored as-is in the remote `items` column
    pub maintenance_items: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_artifact_shape() {
        let raw = json!([
            {
                "template_id": "under_350cc",
                "template_name": "Xe dưới 350cc",
                "description": "Lịch bảo dưỡng chuẩn",
                "maintenance_items": [{"item": "Thay nhớt", "interval_km": 1500}]
            },
            {
                "template_id": "electric",
                "template_name": "Xe điện",
                "maintenance_items": []
            }
        ]);

        let templates: Vec<MaintenanceTemplate> = serde_json::from_value(raw).unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].description.as_deref(), Some("Lịch bảo dưỡng chuẩn"));
        assert_eq!(templates[1].description, None);
        assert_eq!(templates[0].maintenance_items[0]["interval_km"], 1500);
    }
}

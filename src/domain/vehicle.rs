use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Template assigned to every vehicle unless a classification rule overrides it
pub const DEFAULT_TEMPLATE_ID: &str = "under_350cc";

/// One catalog row as read from the source document, before identity resolution.
///
/// `columns` holds the trimmed text of every cell in document order. The anchor in the
/// model column, when present, contributes both the display name and the detail link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRowRecord {
    pub columns: Vec<String>,
    pub link_href: Option<String>,
    pub link_text: Option<String>,
    /// Position of the row among all rows matched by the row marker
    pub row_index: usize,
}

impl RawRowRecord {
    pub fn brand(&self) -> &str {
        self.column(0)
    }

    /// Anchor text when the model cell has a link, otherwise the raw cell text
    pub fn model_name(&self) -> &str {
        self.link_text.as_deref().unwrap_or_else(|| self.column(1))
    }

    pub fn version(&self) -> &str {
        self.column(2)
    }

    pub fn raw_type(&self) -> &str {
        self.column(3)
    }

    fn column(&self, index: usize) -> &str {
        self.columns.get(index).map_or("", String::as_str)
    }
}

/// Canonical catalog entity, keyed by `id`.
///
/// Serialized field names are the hand-off artifact's names, shared by the
/// extraction output and the synchronization input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub template_id: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub detail_url: String,
    pub versions: Vec<String>,
    /// Filled by the enrichment step between extraction and sync
    pub specs: Map<String, Value>,
}

impl VehicleRecord {
    /// Append a version label unless an identical one is already present.
    ///
    /// Returns `true` when the label was new.
    pub fn add_version(&mut self, version: &str) -> bool {
        if self.versions.iter().any(|v| v == version) {
            return false;
        }
        self.versions.push(version.to_string());
        true
    }

    /// Append a tag keeping insertion order and set semantics
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VehicleRecord {
        VehicleRecord {
            id: "vision-2024".to_string(),
            name: "Vision".to_string(),
            brand: "Honda".to_string(),
            vehicle_type: "Xe tay ga".to_string(),
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            tags: vec!["scooter".to_string()],
            detail_url: "https://vnexpress.net/oto-xe-may/v-moto/vision-2024".to_string(),
            versions: vec!["Tiêu chuẩn".to_string()],
            specs: Map::new(),
        }
    }

    #[test]
    fn test_add_version_skips_exact_duplicates() {
        let mut vehicle = record();
        assert!(vehicle.add_version("Đặc biệt"));
        assert!(!vehicle.add_version("Tiêu chuẩn"));
        assert!(!vehicle.add_version("Đặc biệt"));
        assert_eq!(vehicle.versions, vec!["Tiêu chuẩn", "Đặc biệt"]);
    }

    #[test]
    fn test_add_version_is_case_sensitive() {
        let mut vehicle = record();
        assert!(vehicle.add_version("tiêu chuẩn"));
        assert_eq!(vehicle.versions.len(), 2);
    }

    #[test]
    fn test_add_tag_keeps_insertion_order() {
        let mut vehicle = record();
        assert!(!vehicle.add_tag("scooter"));
        assert!(vehicle.add_tag("ev"));
        assert_eq!(vehicle.tags, vec!["scooter", "ev"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(record()).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["id", "name", "brand", "type", "template_id", "tags", "detail_url", "versions", "specs"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["specs"], serde_json::json!({}));
    }

    #[test]
    fn test_deserialize_without_detail_url() {
        let json = r#"{"id":"m1","name":"Wave","brand":"Honda","type":"Xe số","template_id":"under_350cc",
            "tags":["manual"],"versions":["2024"],"specs":{}}"#;
        let vehicle: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.detail_url, "");
        assert_eq!(vehicle.versions, vec!["2024"]);
        assert!(vehicle.specs.is_empty());
    }

    #[test]
    fn test_collection_fields_are_required() {
        let base = r#""id":"m1","name":"Wave","brand":"Honda","type":"Xe số","template_id":"under_350cc""#;
        for missing in ["tags", "versions", "specs"] {
            let fields: Vec<&str> = [r#""tags":[]"#, r#""versions":[]"#, r#""specs":{}"#]
                .into_iter()
                .filter(|f| !f.contains(missing))
                .collect();
            let json = format!("{{{base},{}}}", fields.join(","));
            assert!(
                serde_json::from_str::<VehicleRecord>(&json).is_err(),
                "record without {missing} must be rejected"
            );
        }
    }

    #[test]
    fn test_raw_row_accessors() {
        let row = RawRowRecord {
            columns: vec!["Honda".into(), "cell text".into(), "2024".into(), "Xe số".into(), "18 triệu".into()],
            link_href: Some("/wave".into()),
            link_text: Some("Wave Alpha".into()),
            row_index: 0,
        };
        assert_eq!(row.brand(), "Honda");
        assert_eq!(row.model_name(), "Wave Alpha");
        assert_eq!(row.version(), "2024");
        assert_eq!(row.raw_type(), "Xe số");

        let without_link = RawRowRecord { link_text: None, ..row };
        assert_eq!(without_link.model_name(), "cell text");
    }
}

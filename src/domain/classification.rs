//! Vehicle category classification
//!
//! Maps the catalog's free-text category column (Vietnamese, e.g. "Xe tay ga",
//! "Xe số", "Xe côn tay", "Xe điện") to a maintenance template and a tag set.
//! Matching is a case-insensitive substring test against an ordered rule table;
//! the first matching rule wins because one description can mention several
//! categories.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::vehicle::DEFAULT_TEMPLATE_ID;

/// Classification label attached to a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleTag {
    Scooter,
    Manual,
    ChainDrive,
    Ev,
}

impl VehicleTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scooter => "scooter",
            Self::Manual => "manual",
            Self::ChainDrive => "chain_drive",
            Self::Ev => "ev",
        }
    }
}

impl fmt::Display for VehicleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the rule table
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Lower-case marker searched for in the lower-cased category text
    pub marker: &'static str,
    /// Template override; `None` keeps the caller's default
    pub template_id: Option<&'static str>,
    pub tags: &'static [VehicleTag],
}

/// Ordered rule table. Reordering changes classification output.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        marker: "tay ga",
        template_id: None,
        tags: &[VehicleTag::Scooter],
    },
    ClassificationRule {
        marker: "số",
        template_id: None,
        tags: &[VehicleTag::Manual],
    },
    ClassificationRule {
        marker: "côn",
        template_id: None,
        tags: &[VehicleTag::Manual, VehicleTag::ChainDrive],
    },
    ClassificationRule {
        marker: "điện",
        template_id: Some("electric"),
        tags: &[VehicleTag::Ev],
    },
];

/// Result of classifying one category string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub template_id: String,
    pub tags: Vec<VehicleTag>,
}

impl Classification {
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.as_str().to_string()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    default_template_id: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_ID)
    }
}

impl Classifier {
    pub fn new(default_template_id: impl Into<String>) -> Self {
        Self {
            default_template_id: default_template_id.into(),
        }
    }

    pub fn default_template_id(&self) -> &str {
        &self.default_template_id
    }

    /// Find the first rule whose marker occurs in `raw_type`
    pub fn matching_rule(raw_type: &str) -> Option<&'static ClassificationRule> {
        let lowered = raw_type.to_lowercase();
        CLASSIFICATION_RULES
            .iter()
            .find(|rule| lowered.contains(rule.marker))
    }

    pub fn classify(&self, raw_type: &str) -> Classification {
        match Self::matching_rule(raw_type) {
            Some(rule) => Classification {
                template_id: rule
                    .template_id
                    .map_or_else(|| self.default_template_id.clone(), str::to_string),
                tags: rule.tags.to_vec(),
            },
            None => Classification {
                template_id: self.default_template_id.clone(),
                tags: Vec::new(),
            },
        }
    }
}

//! Parsing configuration for catalog row extraction
//!
//! Centralized configuration for row markers and the base origin used to resolve
//! relative detail links.

use serde::{Deserialize, Serialize};

use crate::infrastructure::config::defaults;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Base origin for resolving relative links
    pub base_url: String,

    /// Tag of catalog rows
    pub row_tag: String,

    /// Class marking catalog rows on the live page
    pub primary_row_class: String,

    /// Looser class tried when the primary one matches nothing
    /// (pages saved from a browser may have rewritten class attributes)
    pub fallback_row_class: String,

    pub cell_tag: String,

    pub link_tag: String,

    /// Rows with fewer cells are skipped
    pub min_cells: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            row_tag: defaults::ROW_TAG.to_string(),
            primary_row_class: defaults::PRIMARY_ROW_CLASS.to_string(),
            fallback_row_class: defaults::FALLBACK_ROW_CLASS.to_string(),
            cell_tag: defaults::CELL_TAG.to_string(),
            link_tag: defaults::LINK_TAG.to_string(),
            min_cells: defaults::MIN_CELLS,
        }
    }
}

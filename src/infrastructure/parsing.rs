//! HTML parsing infrastructure for catalog pages
//!
//! A captured price-list page is parsed into a node tree ([`document`]) and its
//! catalog rows are read by [`row_extractor`]. Row-level failures are values, not
//! early returns.

pub mod config;
pub mod document;
pub mod error;
pub mod row_extractor;

// Re-export public types
pub use config::ParsingConfig;
pub use document::{DocumentNode, HtmlDocument, HtmlNode};
pub use error::{ParsingError, ParsingResult, SkipKind};
pub use row_extractor::{CatalogRowExtractor, RowExtraction, RowMarker};

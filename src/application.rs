//! Application layer module
//!
//! This module contains the two pipelines that orchestrate the domain logic:
//! offline catalog extraction and remote synchronization.

pub mod extraction_use_cases;
pub mod sync_use_cases;

pub use extraction_use_cases::{
    CatalogExtractor, ExtractionError, ExtractionReport, ExtractionRun, run_extraction,
};
pub use sync_use_cases::CatalogSynchronizer;

//! Moto Catalog - vehicle price-list extraction and remote catalog sync
//!
//! Two command-line pipelines share this library:
//! - `crawl_catalog` reads a captured price-list page and writes a deduplicated,
//!   classified vehicle catalog
//! - `push_catalog` upserts maintenance templates and the catalog into a
//!   PostgREST-compatible store

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CatalogExtractor, CatalogSynchronizer, ExtractionError, ExtractionReport};
pub use domain::{SyncSummary, VehicleRecord};
pub use infrastructure::{AppConfig, PostgrestClient, RemoteStore};

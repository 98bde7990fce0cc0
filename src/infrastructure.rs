//! Infrastructure layer for parsing, file artifacts and the remote store
//!
//! This module provides HTML row extraction, JSON artifact storage, layered
//! configuration, logging, and the remote upsert client.

pub mod catalog_store; // JSON catalog and template artifacts
pub mod config; // Layered configuration and defaults
pub mod field_mapper; // Record to remote row mapping
pub mod logging; // Logging infrastructure
pub mod parsing; // Catalog page parsing
pub mod remote_store; // PostgREST upsert client

// Re-export commonly used items
pub use catalog_store::{CatalogStoreError, read_templates, read_vehicles, write_catalog};
pub use config::{AppConfig, ConfigError, LoggingConfig, RemoteConfig, SyncConfig};
pub use field_mapper::{TemplateRow, VehicleRow};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{CatalogRowExtractor, HtmlDocument, ParsingConfig, ParsingError, RowMarker};
pub use remote_store::{PostgrestClient, RemoteStore, RemoteStoreError};

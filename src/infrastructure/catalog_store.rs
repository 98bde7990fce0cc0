//! JSON file storage for catalog artifacts
//!
//! The extraction run writes the catalog here and the sync run reads it back,
//! together with the maintenance template document.

use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{MaintenanceTemplate, VehicleRecord};

#[derive(Error, Debug)]
pub enum CatalogStoreError {
    #[error("File not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogStoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path: path.to_path_buf() }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type CatalogStoreResult<T> = Result<T, CatalogStoreError>;

fn read_json_array<T: DeserializeOwned>(path: &Path) -> CatalogStoreResult<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogStoreError::io(path, e))?;
    let items: Vec<T> = serde_json::from_str(&content).map_err(|e| CatalogStoreError::json(path, e))?;
    debug!("Read {} records from {:?}", items.len(), path);
    Ok(items)
}

/// Read a vehicle catalog artifact (plain or enriched)
pub fn read_vehicles(path: &Path) -> CatalogStoreResult<Vec<VehicleRecord>> {
    read_json_array(path)
}

pub fn read_templates(path: &Path) -> CatalogStoreResult<Vec<MaintenanceTemplate>> {
    read_json_array(path)
}

/// Write the catalog as pretty-printed UTF-8 JSON.
///
/// The content goes to a sibling temporary file first and is renamed into place,
/// so a failed run never leaves a truncated artifact behind.
pub fn write_catalog(path: &Path, records: &[VehicleRecord]) -> CatalogStoreResult<()> {
    let json = serde_json::to_string_pretty(records).map_err(|e| CatalogStoreError::json(path, e))?;

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CatalogStoreError::io(parent, e))?;
    }

    let write_result = std::fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    });
    if let Err(e) = write_result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(CatalogStoreError::io(&tmp_path, e));
    }

    std::fs::rename(&tmp_path, path).map_err(|e| CatalogStoreError::io(path, e))?;
    info!("💾 Wrote {} vehicles to {:?}", records.len(), path);
    Ok(())
}

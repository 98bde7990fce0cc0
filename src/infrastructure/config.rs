//! Configuration infrastructure
//!
//! Settings are layered with the `config` crate, later sources overriding earlier ones:
//! 1. Built-in defaults (`AppConfig::default()`)
//! 2. `<user config dir>/moto-catalog/moto_catalog.{toml,json,yaml}` (optional)
//! 3. `./moto_catalog.{toml,json,yaml}` (optional)
//! 4. `MOTO_CATALOG__<SECTION>__<KEY>` environment variables
//!
//! Remote store credentials have no defaults and are expected from 3 or 4.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::infrastructure::parsing::ParsingConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {field} - {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub parsing: ParsingConfig,
    pub sync: SyncConfig,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

/// Extraction pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Previously captured catalog page
    pub source_document: PathBuf,

    /// Catalog artifact written by the extraction run
    pub output_catalog: PathBuf,

    /// Template assigned when no classification rule overrides it
    pub default_template_id: String,
}

/// Synchronization pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Enriched catalog artifact pushed to the `vehicles` table
    pub vehicles_catalog: PathBuf,

    pub templates_file: PathBuf,

    /// Records per upsert call for the vehicles dataset
    pub chunk_size: usize,

    pub vehicles_table: String,

    pub templates_table: String,

    /// Column used for insert-or-replace conflict resolution
    pub conflict_key: String,
}

/// Remote table store endpoint (PostgREST-compatible)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`
    pub url: Option<String>,

    /// Service key sent as `apikey` and bearer token
    pub api_key: Option<String>,

    /// Serialized chunks above this size are rejected before sending
    pub max_payload_bytes: usize,

    /// No timeout when unset; a hung call blocks the run
    pub request_timeout_seconds: Option<u64>,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted file logs
    pub json_format: bool,

    /// Enable console output (stderr, stdout is reserved for the run summary)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to `logs/` next to the executable
    pub log_directory: Option<PathBuf>,

    pub file_name: String,

    /// Offset applied to log timestamps
    pub utc_offset_hours: i32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            source_document: PathBuf::from(defaults::SOURCE_DOCUMENT),
            output_catalog: PathBuf::from(defaults::OUTPUT_CATALOG),
            default_template_id: crate::domain::DEFAULT_TEMPLATE_ID.to_string(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            vehicles_catalog: PathBuf::from(defaults::VEHICLES_CATALOG),
            templates_file: PathBuf::from(defaults::TEMPLATES_FILE),
            chunk_size: crate::domain::sync::DEFAULT_CHUNK_SIZE,
            vehicles_table: defaults::VEHICLES_TABLE.to_string(),
            templates_table: defaults::TEMPLATES_TABLE.to_string(),
            conflict_key: defaults::CONFLICT_KEY.to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            max_payload_bytes: defaults::MAX_PAYLOAD_BYTES,
            request_timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_directory: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            utc_offset_hours: defaults::LOG_UTC_OFFSET_HOURS,
        }
    }
}

impl AppConfig {
    /// Load configuration from all layers and validate it
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(user_dir) = Self::get_config_dir() {
            let user_file = user_dir.join(defaults::CONFIG_FILE_STEM);
            debug!("Looking for user configuration at {:?}", user_file);
            builder = builder.add_source(
                config::File::with_name(&user_file.to_string_lossy()).required(false),
            );
        }

        let settings = builder
            .add_source(config::File::with_name(defaults::CONFIG_FILE_STEM).required(false))
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load a single configuration file on top of the defaults (no environment)
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::with_name(path))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("moto-catalog"))
    }

    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.chunk_size == 0 {
            return Err(ConfigError::invalid("sync.chunk_size", "must be greater than 0"));
        }

        if self.parsing.min_cells == 0 {
            return Err(ConfigError::invalid("parsing.min_cells", "must be greater than 0"));
        }

        if Url::parse(&self.parsing.base_url).is_err() {
            return Err(ConfigError::invalid(
                "parsing.base_url",
                format!("'{}' is not an absolute URL", self.parsing.base_url),
            ));
        }

        for (field, value) in [
            ("parsing.primary_row_class", &self.parsing.primary_row_class),
            ("parsing.fallback_row_class", &self.parsing.fallback_row_class),
            ("sync.vehicles_table", &self.sync.vehicles_table),
            ("sync.templates_table", &self.sync.templates_table),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }

        if !(-23..=23).contains(&self.logging.utc_offset_hours) {
            return Err(ConfigError::invalid(
                "logging.utc_offset_hours",
                "must be between -23 and 23",
            ));
        }

        if self.remote.max_payload_bytes == 0 {
            return Err(ConfigError::invalid("remote.max_payload_bytes", "must be greater than 0"));
        }

        Ok(())
    }
}

/// Default configuration values
pub mod defaults {
    /// Configuration file name without extension
    pub const CONFIG_FILE_STEM: &str = "moto_catalog";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "MOTO_CATALOG";

    /// Base origin of the catalog site
    pub const BASE_URL: &str = "https://vnexpress.net";

    /// Price-list page saved from a browser
    pub const SOURCE_DOCUMENT: &str = "banggia.html";

    pub const OUTPUT_CATALOG: &str = "vehicles_from_local.json";

    /// Catalog after the enrichment step filled `specs`
    pub const VEHICLES_CATALOG: &str = "vehicles_complete.json";

    pub const TEMPLATES_FILE: &str = "maintenance_templates.json";

    pub const ROW_TAG: &str = "tr";

    pub const PRIMARY_ROW_CLASS: &str = "banggiaxe-item";

    pub const FALLBACK_ROW_CLASS: &str = "init-banggia";

    pub const CELL_TAG: &str = "td";

    pub const LINK_TAG: &str = "a";

    pub const MIN_CELLS: usize = 5;

    pub const VEHICLES_TABLE: &str = "vehicles";

    pub const TEMPLATES_TABLE: &str = "maintenance_templates";

    pub const CONFLICT_KEY: &str = "id";

    /// 1 MiB per upsert request
    pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_JSON_FORMAT: bool = false;

    pub const LOG_CONSOLE_OUTPUT: bool = true;

    pub const LOG_FILE_OUTPUT: bool = false;

    pub const LOG_FILE_NAME: &str = "moto-catalog.log";

    /// Indochina Time, the catalog site's local time
    pub const LOG_UTC_OFFSET_HOURS: i32 = 7;
}

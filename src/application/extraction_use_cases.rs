//! Catalog extraction use case
//!
//! Reads a captured price-list page, turns its rows into deduplicated
//! [`VehicleRecord`]s and writes the catalog artifact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    Classifier, DetailLink, IngestOutcome, RawRowRecord, ResolvedRow, VehicleCatalog, VehicleRecord,
};
use crate::infrastructure::catalog_store::{self, CatalogStoreError};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::parsing::{
    CatalogRowExtractor, HtmlDocument, ParsingConfig, ParsingError, ParsingResult, RowMarker, SkipKind,
};

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Source document not found: {path:?}")]
    SourceMissing { path: PathBuf },

    #[error("Failed to read source document {path:?}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write catalog: {0}")]
    Output(#[from] CatalogStoreError),
}

/// Outcome of one extraction pass over a document
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub marker: RowMarker,
    pub rows_matched: usize,
    /// Rows that produced a new entity
    pub entities_created: usize,
    /// Rows that added a version to an existing entity
    pub versions_merged: usize,
    /// Rows repeating an id and a version already seen
    pub duplicate_rows: usize,
    pub skipped: Vec<ParsingError>,
    pub records: Vec<VehicleRecord>,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skip_counts(&self) -> BTreeMap<SkipKind, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.skipped {
            *counts.entry(error.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// Result of a full extraction run
#[derive(Debug)]
pub struct ExtractionRun {
    pub report: ExtractionReport,
    /// Artifact location; `None` when nothing was extracted and no file was written
    pub output: Option<PathBuf>,
}

pub struct CatalogExtractor {
    rows: CatalogRowExtractor,
    classifier: Classifier,
}

impl CatalogExtractor {
    pub fn new(parsing: ParsingConfig, classifier: Classifier) -> Self {
        Self {
            rows: CatalogRowExtractor::new(parsing),
            classifier,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.parsing.clone(),
            Classifier::new(config.extraction.default_template_id.clone()),
        )
    }

    /// Resolve identity and classify one raw row
    pub fn resolve_row(&self, raw: &RawRowRecord) -> ParsingResult<ResolvedRow> {
        let row_index = raw.row_index;
        let href = match (&raw.link_href, &raw.link_text) {
            (Some(href), _) => href,
            (None, Some(_)) => return Err(ParsingError::MissingHref { row_index }),
            (None, None) => return Err(ParsingError::MissingDetailLink { row_index }),
        };

        let link = DetailLink::resolve(href, &self.rows.config().base_url)
            .map_err(|source| ParsingError::UnresolvableIdentity { row_index, source })?;

        Ok(ResolvedRow {
            link,
            name: raw.model_name().to_string(),
            brand: raw.brand().to_string(),
            raw_type: raw.raw_type().to_string(),
            version: raw.version().to_string(),
            classification: self.classifier.classify(raw.raw_type()),
        })
    }

    /// Extract the catalog from page content
    pub fn extract_document(&self, html: &str) -> ExtractionReport {
        let document = HtmlDocument::parse(html);
        let extraction = self.rows.extract(&document.root());

        let mut catalog = VehicleCatalog::new();
        let mut skipped = Vec::new();
        let (mut created, mut merged, mut duplicates) = (0, 0, 0);

        let rows_matched = extraction.matched_rows();
        for row in extraction.rows {
            match row.and_then(|raw| self.resolve_row(&raw)) {
                Ok(resolved) => match catalog.ingest(resolved) {
                    IngestOutcome::Created => created += 1,
                    IngestOutcome::VersionAdded => merged += 1,
                    IngestOutcome::Duplicate => duplicates += 1,
                },
                Err(e) => {
                    warn!("Skipped row: {}", e);
                    skipped.push(e);
                }
            }
        }

        if extraction.marker == RowMarker::NotFound {
            warn!("⚠️ No catalog rows found with either row marker");
        }

        ExtractionReport {
            marker: extraction.marker,
            rows_matched,
            entities_created: created,
            versions_merged: merged,
            duplicate_rows: duplicates,
            skipped,
            records: catalog.into_records(),
        }
    }

    /// Extract from a file on disk
    pub fn extract_file(&self, path: &Path) -> Result<ExtractionReport, ExtractionError> {
        let html = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ExtractionError::SourceMissing { path: path.to_path_buf() }
            } else {
                ExtractionError::SourceUnreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        info!("📄 Loaded {:?} ({} bytes)", path, html.len());
        Ok(self.extract_document(&html))
    }

    /// Extract `source` and write the catalog to `output`.
    ///
    /// Nothing is written when the document yields no entities.
    pub fn run(&self, source: &Path, output: &Path) -> Result<ExtractionRun, ExtractionError> {
        let report = self.extract_file(source)?;
        info!(
            "Rows matched: {} (marker: {}), entities: {}, merged versions: {}, skipped: {}",
            report.rows_matched,
            report.marker,
            report.records.len(),
            report.versions_merged,
            report.skipped.len()
        );

        if report.is_empty() {
            warn!("No data extracted from {:?}; catalog not written", source);
            return Ok(ExtractionRun { report, output: None });
        }

        catalog_store::write_catalog(output, &report.records)?;
        Ok(ExtractionRun {
            report,
            output: Some(output.to_path_buf()),
        })
    }
}

/// Run the extraction pipeline with paths from configuration
pub fn run_extraction(config: &AppConfig) -> Result<ExtractionRun, ExtractionError> {
    CatalogExtractor::from_config(config).run(
        &config.extraction.source_document,
        &config.extraction.output_catalog,
    )
}

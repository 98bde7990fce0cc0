//! Offline catalog extraction
//!
//! Reads the captured price-list page and writes the deduplicated catalog artifact.
//! Paths come from configuration; positional arguments override them:
//!
//! ```bash
//! crawl_catalog [source.html] [output.json]
//! ```
//!
//! Failures are reported on stdout and the process still exits normally.

use std::path::PathBuf;
use tracing::{error, warn};

use moto_catalog::application::{CatalogExtractor, ExtractionReport, ExtractionRun};
use moto_catalog::infrastructure::config::AppConfig;
use moto_catalog::infrastructure::logging::{init_logging, init_logging_with_config};

fn print_report(report: &ExtractionReport) {
    println!("📊 Extraction summary");
    println!("   Row marker:      {}", report.marker);
    println!("   Rows matched:    {}", report.rows_matched);
    println!("   Vehicles:        {}", report.records.len());
    println!("   Merged versions: {}", report.versions_merged);
    println!("   Duplicate rows:  {}", report.duplicate_rows);
    println!("   Skipped rows:    {}", report.skipped.len());
    for (kind, count) in report.skip_counts() {
        println!("     {kind:?}: {count}");
    }
}

fn main() -> anyhow::Result<()> {
    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging();
            error!("{}", e);
            println!("❌ {e}");
            println!("📊 Extraction summary: nothing extracted");
            return Ok(());
        }
    };
    if let Err(e) = init_logging_with_config(&config.logging) {
        let _ = init_logging();
        warn!("Falling back to default logging: {}", e);
    }

    let mut args = std::env::args().skip(1);
    if let Some(source) = args.next() {
        config.extraction.source_document = PathBuf::from(source);
    }
    if let Some(output) = args.next() {
        config.extraction.output_catalog = PathBuf::from(output);
    }

    println!("🚀 Extracting catalog from {:?}", config.extraction.source_document);

    let extractor = CatalogExtractor::from_config(&config);
    match extractor.run(
        &config.extraction.source_document,
        &config.extraction.output_catalog,
    ) {
        Ok(ExtractionRun { report, output }) => {
            print_report(&report);
            match output {
                Some(path) => println!("✅ Saved {} vehicles to {:?}", report.records.len(), path),
                None => println!("⚠️ No data found, nothing written"),
            }
        }
        Err(e) => {
            error!("{}", e);
            println!("❌ {e}");
            println!("📊 Extraction summary: no catalog written");
        }
    }

    Ok(())
}

//! Remote catalog synchronization
//!
//! Upserts the maintenance templates and the enriched vehicle catalog into the
//! configured PostgREST store. Credentials are read from configuration, typically
//! `MOTO_CATALOG__REMOTE__URL` and `MOTO_CATALOG__REMOTE__API_KEY`.
//!
//! A summary is always printed; configuration problems mark both datasets as not pushed.

use std::sync::Arc;
use tracing::{error, warn};

use moto_catalog::application::CatalogSynchronizer;
use moto_catalog::domain::{DatasetReport, SyncSummary};
use moto_catalog::infrastructure::config::{AppConfig, SyncConfig};
use moto_catalog::infrastructure::logging::{init_logging, init_logging_with_config};
use moto_catalog::infrastructure::remote_store::PostgrestClient;

fn print_report(report: &DatasetReport) {
    if let Some(e) = &report.load_error {
        println!("❌ {} ({}): not pushed, {}", report.dataset, report.table, e);
        return;
    }

    let failed: Vec<_> = report.failed_chunks().collect();
    let icon = if failed.is_empty() { "✅" } else { "⚠️" };
    println!(
        "{} {} ({}): {}/{} records in {} chunk(s), {} failed",
        icon,
        report.dataset,
        report.table,
        report.records_pushed(),
        report.total_records,
        report.chunks.len(),
        failed.len()
    );
    for chunk in failed {
        println!("   {chunk}");
    }
}

fn abandoned(sync: &SyncConfig, reason: &str) -> SyncSummary {
    error!("{}", reason);
    println!("❌ {reason}");
    SyncSummary::abandoned(&sync.templates_table, &sync.vehicles_table, reason)
}

async fn run() -> SyncSummary {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging();
            return abandoned(&SyncConfig::default(), &e.to_string());
        }
    };
    if let Err(e) = init_logging_with_config(&config.logging) {
        let _ = init_logging();
        warn!("Falling back to default logging: {}", e);
    }

    let client = match PostgrestClient::new(&config.remote, &config.sync.conflict_key) {
        Ok(client) => client,
        Err(e) => return abandoned(&config.sync, &e.to_string()),
    };

    println!("🚀 Pushing catalog to {}", config.remote.url.as_deref().unwrap_or_default());
    CatalogSynchronizer::new(Arc::new(client), config.sync.clone())
        .run()
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let summary = run().await;

    println!("📊 Sync summary");
    print_report(&summary.templates);
    print_report(&summary.vehicles);

    if summary.is_success() {
        println!("🎉 All datasets synchronized");
    }

    Ok(())
}

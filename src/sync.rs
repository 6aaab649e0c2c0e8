//! Sync driver: walks the configured queries page by page and feeds the
//! normalize → persist pipeline.
//!
//! Execution is strictly sequential — one page is fetched, normalized, and
//! fully persisted before the next request goes out, with a fixed delay
//! between page requests to stay inside the API's informal rate limits.
//! Failures are local: a failed page or record is logged and counted, and
//! the run always completes. Only a missing API key or an unreachable
//! database aborts before work begins.

use anyhow::Result;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::config::Config;
use crate::db;
use crate::models::{PersistStatus, QueryCounters, SyncReport};
use crate::normalize::normalize;
use crate::source::{AladinSource, BookSource};
use crate::store::persist_book;

/// Entry point for `bookmood sync`: builds the live Aladin source and runs
/// the catalog sync against the configured database.
pub async fn run_sync(config: &Config, dry_run: bool, limit: Option<u64>) -> Result<()> {
    // Credentials are validated before any page is requested.
    let ttb_key = config.api_key()?;
    let source = AladinSource::new(&config.api, ttb_key)?;

    let pool = db::connect(config).await?;
    let report = sync_catalog(&pool, &source, config, dry_run, limit).await?;
    pool.close().await;

    print_report(&report, config.api.error_sample, dry_run);
    Ok(())
}

/// Runs the full sync loop against an arbitrary [`BookSource`].
///
/// Per (query, page): a fetch error is logged and the page skipped; an
/// empty page ends pagination for that query; otherwise items without an
/// ISBN-13 are dropped, the rest are normalized and persisted one by one.
/// With `dry_run` nothing is written and every normalized record counts as
/// an insert. `limit` caps the number of persist attempts across the run.
pub async fn sync_catalog(
    pool: &SqlitePool,
    source: &dyn BookSource,
    config: &Config,
    dry_run: bool,
    limit: Option<u64>,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    'queries: for query in &config.queries {
        let mut counters = QueryCounters {
            label: query.label.clone(),
            ..Default::default()
        };

        for page in 1..=config.api.max_pages {
            let items = match source.fetch_page(query, page).await {
                Ok(items) => items,
                Err(e) => {
                    println!("[{}] page {}: fetch failed: {}", query.label, page, e);
                    report.pages_failed += 1;
                    pace(config).await;
                    continue;
                }
            };

            if items.is_empty() {
                println!("[{}] page {}: no more results", query.label, page);
                break;
            }

            counters.pages += 1;
            let item_count = items.len();

            for item in &items {
                if limit.is_some_and(|l| report.total >= l) {
                    println!("Reached limit of {} records", limit.unwrap_or(0));
                    report.per_query.push(counters);
                    break 'queries;
                }

                let Some(record) = normalize(item) else {
                    report.dropped += 1;
                    counters.dropped += 1;
                    continue;
                };

                if dry_run {
                    report.record_inserted();
                    counters.inserted += 1;
                    continue;
                }

                match persist_book(pool, &record).await {
                    Ok(PersistStatus::Inserted) => {
                        report.record_inserted();
                        counters.inserted += 1;
                    }
                    Ok(PersistStatus::Skipped) => {
                        report.record_skipped();
                        counters.skipped += 1;
                    }
                    Err(e) => {
                        println!("[{}] failed to save {}: {}", query.label, record.isbn13, e);
                        report.record_failed(format!("{}: {}", record.isbn13, e));
                        counters.failed += 1;
                    }
                }
            }

            println!(
                "[{}] page {}: {} items — {} inserted, {} skipped so far",
                query.label, page, item_count, counters.inserted, counters.skipped
            );

            pace(config).await;
        }

        report.per_query.push(counters);
    }

    Ok(report)
}

/// Fixed inter-request delay.
async fn pace(config: &Config) {
    if config.api.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.api.delay_ms)).await;
    }
}

fn print_report(report: &SyncReport, error_sample: usize, dry_run: bool) {
    if dry_run {
        println!("sync (dry-run)");
    } else {
        println!("sync");
    }
    println!("  total:    {}", report.total);
    println!("  inserted: {}", report.inserted);
    println!("  skipped:  {}", report.skipped);
    println!("  failed:   {}", report.failed);
    println!("  dropped (no ISBN-13): {}", report.dropped);
    if report.pages_failed > 0 {
        println!("  pages failed: {}", report.pages_failed);
    }

    if !report.per_query.is_empty() {
        println!();
        println!(
            "  {:<24} {:>5} {:>8} {:>8} {:>7}",
            "QUERY", "PAGES", "INSERTED", "SKIPPED", "FAILED"
        );
        for q in &report.per_query {
            println!(
                "  {:<24} {:>5} {:>8} {:>8} {:>7}",
                q.label, q.pages, q.inserted, q.skipped, q.failed
            );
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("  first failures:");
        for message in report.failures.iter().take(error_sample) {
            println!("    - {}", message);
        }
    }

    println!("ok");
}

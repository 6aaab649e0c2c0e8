//! Catalog statistics overview.
//!
//! Provides a quick summary of what's been ingested: row counts, newest and
//! oldest fetch timestamps, and a per-category breakdown. Used by
//! `bookmood stats` to give confidence that sync runs are landing.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;
use crate::store;

/// Run the stats command: query the catalog and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let total_books = store::count_books(&pool).await?;

    let newest: Option<i64> = sqlx::query_scalar("SELECT MAX(fetched_at) FROM book_external")
        .fetch_one(&pool)
        .await?;
    let oldest: Option<i64> = sqlx::query_scalar("SELECT MIN(fetched_at) FROM book_external")
        .fetch_one(&pool)
        .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("BookMood Sync — Catalog Stats");
    println!("=============================");
    println!();
    println!("  Database:     {}", config.db.path.display());
    println!("  Size:         {}", format_bytes(db_size));
    println!();
    println!("  Books:        {}", total_books);
    println!(
        "  Newest fetch: {}",
        newest.map_or_else(|| "never".to_string(), format_ts_relative)
    );
    println!(
        "  Oldest fetch: {}",
        oldest.map_or_else(|| "never".to_string(), format_ts_iso)
    );

    // Per-category breakdown
    let category_rows = sqlx::query(
        r#"
        SELECT
            COALESCE(category_name, '(uncategorized)') AS category,
            COUNT(*) AS book_count
        FROM book_external
        GROUP BY category
        ORDER BY book_count DESC
        LIMIT 15
        "#,
    )
    .fetch_all(&pool)
    .await?;

    if !category_rows.is_empty() {
        println!();
        println!("  By category:");
        println!("  {:<48} {:>6}", "CATEGORY", "BOOKS");
        println!("  {}", "-".repeat(56));

        for row in &category_rows {
            let category: String = row.get("category");
            let count: i64 = row.get("book_count");
            println!("  {:<48} {:>6}", category, count);
        }
    }

    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

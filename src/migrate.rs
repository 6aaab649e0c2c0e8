use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    create_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Creates the `book_external` table and its indexes. Idempotent.
///
/// `category_id` is constrained to the 16-bit signed range at the schema
/// level; normalization already drops out-of-range values to NULL, so a
/// violation here indicates a bug upstream, not bad source data.
pub async fn create_schema(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_external (
            isbn13 TEXT PRIMARY KEY,
            item_id INTEGER NOT NULL,
            title TEXT,
            author TEXT,
            publisher TEXT,
            pub_date TEXT,
            cover_url TEXT,
            summary TEXT,
            aladin_link TEXT,
            category_id INTEGER CHECK (category_id BETWEEN -32768 AND 32767),
            category_name TEXT,
            price_standard INTEGER,
            price_sales INTEGER,
            customer_review_rank REAL,
            raw_json TEXT NOT NULL,
            fetched_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_book_external_fetched_at ON book_external(fetched_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_book_external_category ON book_external(category_name)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

//! Dedup insert into the `book_external` catalog table.
//!
//! Persistence is a single conditional write per record:
//! `INSERT ... ON CONFLICT(isbn13) DO NOTHING`. The rows-affected count
//! tells inserted apart from skipped without a separate existence check,
//! so two sync runs racing on the same ISBN cannot trip a duplicate-key
//! failure — the loser simply observes zero rows written.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{BookRecord, PersistStatus};

/// Inserts a record unless its ISBN-13 is already present.
///
/// Never overwrites an existing row: the first observation of an ISBN wins
/// and later observations are skipped. Store errors propagate to the
/// caller, which counts them as failures without aborting the run.
pub async fn persist_book(pool: &SqlitePool, record: &BookRecord) -> Result<PersistStatus> {
    let result = sqlx::query(
        r#"
        INSERT INTO book_external (
            isbn13, item_id, title, author, publisher, pub_date,
            cover_url, summary, aladin_link, category_id, category_name,
            price_standard, price_sales, customer_review_rank,
            raw_json, fetched_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(isbn13) DO NOTHING
        "#,
    )
    .bind(&record.isbn13)
    .bind(record.item_id)
    .bind(&record.title)
    .bind(&record.author)
    .bind(&record.publisher)
    .bind(&record.pub_date)
    .bind(&record.cover_url)
    .bind(&record.summary)
    .bind(&record.aladin_link)
    .bind(record.category_id)
    .bind(&record.category_name)
    .bind(record.price_standard)
    .bind(record.price_sales)
    .bind(record.customer_review_rank)
    .bind(&record.raw_json)
    .bind(record.fetched_at.timestamp())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        Ok(PersistStatus::Skipped)
    } else {
        Ok(PersistStatus::Inserted)
    }
}

/// Number of rows currently in the catalog.
pub async fn count_books(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_external")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

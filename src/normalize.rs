//! Raw API item → catalog record transformation.
//!
//! The Aladin API is treated as untrusted input: every field is pulled out
//! of the loosely-typed JSON explicitly, coerced where the API is known to
//! waver between strings and numbers, and dropped to `None` when it cannot
//! be converted. An item without a usable ISBN-13 cannot be keyed and is
//! rejected outright; the caller counts it as dropped.

use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::models::BookRecord;

/// Normalizes one raw API item into a [`BookRecord`].
///
/// Returns `None` when the item has no non-empty `isbn13`. The full source
/// payload is retained verbatim in `raw_json` regardless of which mapped
/// fields survived coercion.
pub fn normalize(item: &Value) -> Option<BookRecord> {
    let isbn13 = nonempty_string(item, "isbn13")?;

    let item_id = integer_field(item, "itemId").unwrap_or_else(|| surrogate_item_id(&isbn13));

    Some(BookRecord {
        item_id,
        title: nonempty_string(item, "title"),
        author: nonempty_string(item, "author"),
        publisher: nonempty_string(item, "publisher"),
        pub_date: nonempty_string(item, "pubDate"),
        cover_url: nonempty_string(item, "cover"),
        summary: nonempty_string(item, "description"),
        aladin_link: nonempty_string(item, "link"),
        category_id: integer_field(item, "categoryId").and_then(clamp_smallint),
        category_name: nonempty_string(item, "categoryName"),
        price_standard: integer_field(item, "priceStandard"),
        price_sales: integer_field(item, "priceSales"),
        customer_review_rank: decimal_field(item, "customerReviewRank"),
        raw_json: item.to_string(),
        fetched_at: Utc::now(),
        isbn13,
    })
}

fn nonempty_string(item: &Value, key: &str) -> Option<String> {
    let s = item.get(key)?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Parses an integer field the API serves as either a number or a string.
/// Unparseable values yield `None`, never an error.
fn integer_field(item: &Value, key: &str) -> Option<i64> {
    match item.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Parses a decimal score served as either a number or a string.
fn decimal_field(item: &Value, key: &str) -> Option<f64> {
    match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Drops category IDs that do not fit the 16-bit `category_id` column.
///
/// Aladin's category taxonomy runs well past 32767; anything outside the
/// column's range is discarded rather than wrapped or saturated.
fn clamp_smallint(value: i64) -> Option<i16> {
    i16::try_from(value).ok()
}

/// Deterministic surrogate for items the API serves without an `itemId`.
///
/// Derived from the ISBN so repeated syncs of the same item produce the
/// same row (the original scripts substituted a fresh random value here).
fn surrogate_item_id(isbn13: &str) -> i64 {
    let digest = Sha256::digest(isbn13.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(bytes) & (i64::MAX as u64)) as i64
}

//! Core data models used throughout BookMood Sync.
//!
//! These types represent the normalized book records flowing from the API
//! adapter into the catalog table, and the counters reported at the end of
//! a sync run.

use chrono::{DateTime, Utc};

/// A normalized book record ready for persistence in `book_external`.
///
/// Produced by [`crate::normalize::normalize`] from a loosely-typed Aladin
/// API item. Every descriptive field is optional; only the ISBN-13 natural
/// key, the item id (or its surrogate), the retained raw payload, and the
/// ingestion timestamp are guaranteed.
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub isbn13: String,
    pub item_id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub pub_date: Option<String>,
    pub cover_url: Option<String>,
    pub summary: Option<String>,
    pub aladin_link: Option<String>,
    /// Always within the 16-bit signed range; out-of-range source values
    /// are dropped to `None` during normalization.
    pub category_id: Option<i16>,
    pub category_name: Option<String>,
    pub price_standard: Option<i64>,
    pub price_sales: Option<i64>,
    pub customer_review_rank: Option<f64>,
    /// The original API payload, verbatim, for audit and forward
    /// compatibility.
    pub raw_json: String,
    pub fetched_at: DateTime<Utc>,
}

/// Outcome of persisting a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStatus {
    /// The record was new and has been written.
    Inserted,
    /// A row with the same ISBN-13 already exists; nothing was written.
    Skipped,
}

/// Per-query slice of the run counters, for the report breakdown.
#[derive(Debug, Clone, Default)]
pub struct QueryCounters {
    pub label: String,
    pub pages: u32,
    pub inserted: u64,
    pub skipped: u64,
    pub failed: u64,
    pub dropped: u64,
}

/// Aggregate counters for a whole sync run.
///
/// `total` counts persist attempts, so `total == inserted + skipped +
/// failed` holds at the end of every run. Items dropped for lacking an
/// ISBN-13 never reach the store and are tallied separately.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub total: u64,
    pub inserted: u64,
    pub skipped: u64,
    pub failed: u64,
    pub dropped: u64,
    pub pages_failed: u64,
    pub failures: Vec<String>,
    pub per_query: Vec<QueryCounters>,
}

impl SyncReport {
    pub fn record_inserted(&mut self) {
        self.total += 1;
        self.inserted += 1;
    }

    pub fn record_skipped(&mut self) {
        self.total += 1;
        self.skipped += 1;
    }

    pub fn record_failed(&mut self, message: String) {
        self.total += 1;
        self.failed += 1;
        self.failures.push(message);
    }
}

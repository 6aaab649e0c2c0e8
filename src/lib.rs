//! # BookMood Sync
//!
//! Batch ingestion of book metadata from the Aladin bibliographic API into
//! the BookMood catalog.
//!
//! The pipeline walks a configured list of queries (bestsellers, new
//! arrivals, category browses), fetches each page of results, normalizes
//! the loosely-typed API records into [`models::BookRecord`] rows, and
//! inserts them into the `book_external` table keyed by ISBN-13. Records
//! already present are skipped, never overwritten.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────┐
//! │  Aladin API  │──▶│  Normalize   │──▶│    SQLite     │
//! │  paged JSON  │   │ coerce+clamp │   │ book_external │
//! └──────────────┘   └──────────────┘   └───────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! bookmood init                       # create the catalog database
//! ALADIN_TTB_KEY=... bookmood sync    # ingest configured queries
//! bookmood stats                      # what's in the catalog
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`source`] | Aladin API page fetcher |
//! | [`normalize`] | Raw item → catalog record transformation |
//! | [`store`] | Dedup insert into `book_external` |
//! | [`sync`] | Sync driver and run report |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod config;
pub mod db;
pub mod migrate;
pub mod models;
pub mod normalize;
pub mod source;
pub mod sources;
pub mod stats;
pub mod store;
pub mod sync;

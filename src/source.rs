//! Aladin API page fetcher.
//!
//! [`AladinSource`] issues paginated `ItemList` requests against the Aladin
//! TTB API and hands back the raw `item` entries as loosely-typed JSON.
//! The [`BookSource`] trait is the seam the sync driver is written against,
//! so tests can substitute a scripted fake.
//!
//! A fetch distinguishes two outcomes the original scripts conflated:
//! `Ok(vec![])` means the query genuinely ran out of results, while
//! transport failures, non-2xx statuses, and Aladin's in-body `errorCode`
//! responses are returned as `Err`. The driver logs an `Err` and moves on
//! to the next page; there is no retry or backoff.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Write as _;

use crate::config::{ApiConfig, QueryConfig};

#[async_trait]
pub trait BookSource: Send + Sync {
    /// Fetches one page (1-based) of results for the given query.
    async fn fetch_page(&self, query: &QueryConfig, page: u32) -> Result<Vec<Value>>;
}

/// Live adapter for the Aladin TTB `ItemList` endpoint.
pub struct AladinSource {
    client: reqwest::Client,
    base_url: String,
    ttb_key: String,
    page_size: u32,
}

impl AladinSource {
    pub fn new(api: &ApiConfig, ttb_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bookmood-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.clone(),
            ttb_key,
            page_size: api.page_size,
        })
    }

    /// Builds the request URL with the fixed protocol parameters
    /// (`SearchTarget=Book`, JSON output, pinned API version).
    fn build_url(&self, query: &QueryConfig, page: u32) -> String {
        let mut url = format!(
            "{}?ttbkey={}&QueryType={}&MaxResults={}&start={}&SearchTarget=Book&output=js&Version=20131101",
            self.base_url, self.ttb_key, query.query_type, self.page_size, page
        );

        if let Some(category_id) = query.category_id {
            write!(url, "&CategoryId={}", category_id).unwrap();
        }

        url
    }
}

#[async_trait]
impl BookSource for AladinSource {
    async fn fetch_page(&self, query: &QueryConfig, page: u32) -> Result<Vec<Value>> {
        let url = self.build_url(query, page);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: Value = response.json().await?;
        extract_items(&body)
    }
}

/// Pulls the `item` array out of a response body.
///
/// Aladin reports application errors inside a 200 body as an
/// `errorCode`/`errorMessage` pair; those become `Err`. A well-formed body
/// without an `item` array means the query ran dry.
fn extract_items(body: &Value) -> Result<Vec<Value>> {
    if let Some(code) = body.get("errorCode") {
        let message = body
            .get("errorMessage")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        bail!("Aladin error {}: {}", code, message);
    }

    match body.get("item") {
        Some(Value::Array(items)) => Ok(items.clone()),
        _ => Ok(Vec::new()),
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the Aladin TTB API key.
///
/// The key is deliberately kept out of the TOML file so configs can be
/// committed without leaking credentials.
pub const API_KEY_ENV: &str = "ALADIN_TTB_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default = "default_queries")]
    pub queries: Vec<QueryConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Records per page (Aladin caps `MaxResults` at 100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Pages fetched per query before giving up.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Delay between page requests, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// How many failure messages to include in the final report.
    #[serde(default = "default_error_sample")]
    pub error_sample: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            delay_ms: default_delay_ms(),
            error_sample: default_error_sample(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.aladin.co.kr/ttb/api/ItemList.aspx".to_string()
}
fn default_page_size() -> u32 {
    50
}
fn default_max_pages() -> u32 {
    4
}
fn default_delay_ms() -> u64 {
    500
}
fn default_error_sample() -> usize {
    5
}

/// One (query type, optional category) pair the driver walks during a sync.
#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    /// Aladin `QueryType`: `Bestseller`, `ItemNewAll`, `ItemNewSpecial`,
    /// or `BlogBest`.
    pub query_type: String,
    /// Aladin `CategoryId` for category-scoped browses.
    #[serde(default)]
    pub category_id: Option<i32>,
    /// Human-readable label used in logs and the run report.
    pub label: String,
}

/// The query set the original sync scripts walked on every run.
fn default_queries() -> Vec<QueryConfig> {
    vec![
        QueryConfig {
            query_type: "Bestseller".to_string(),
            category_id: None,
            label: "bestsellers".to_string(),
        },
        QueryConfig {
            query_type: "ItemNewSpecial".to_string(),
            category_id: None,
            label: "new-special".to_string(),
        },
        QueryConfig {
            query_type: "ItemNewAll".to_string(),
            category_id: Some(1), // novels/poetry/drama
            label: "new-fiction".to_string(),
        },
        QueryConfig {
            query_type: "ItemNewAll".to_string(),
            category_id: Some(798), // self-improvement
            label: "new-self-improvement".to_string(),
        },
        QueryConfig {
            query_type: "Bestseller".to_string(),
            category_id: Some(55889), // essays
            label: "essay-bestsellers".to_string(),
        },
    ]
}

impl Config {
    /// Reads the Aladin API key from the environment.
    ///
    /// A missing key is a fatal configuration error: the sync must not
    /// start issuing requests without credentials.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(API_KEY_ENV)
            .map_err(|_| anyhow::anyhow!("{} environment variable not set", API_KEY_ENV))
    }

    /// Whether the API key is present, without reading its value.
    pub fn api_key_present(&self) -> bool {
        std::env::var(API_KEY_ENV).is_ok_and(|v| !v.is_empty())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.api.page_size == 0 || config.api.page_size > 100 {
        anyhow::bail!("api.page_size must be in [1, 100] (Aladin caps MaxResults at 100)");
    }

    if config.api.max_pages == 0 {
        anyhow::bail!("api.max_pages must be >= 1");
    }

    if config.queries.is_empty() {
        anyhow::bail!("at least one [[queries]] entry is required");
    }

    for query in &config.queries {
        match query.query_type.as_str() {
            "Bestseller" | "ItemNewAll" | "ItemNewSpecial" | "BlogBest" => {}
            other => anyhow::bail!(
                "Unknown query_type: '{}'. Must be Bestseller, ItemNewAll, ItemNewSpecial, or BlogBest.",
                other
            ),
        }
    }

    Ok(config)
}

use anyhow::Result;

use crate::config::{Config, API_KEY_ENV};

/// Lists the configured sync queries and whether credentials are in place.
pub fn list_queries(config: &Config) -> Result<()> {
    if config.api_key_present() {
        println!("API key:  OK ({} is set)", API_KEY_ENV);
    } else {
        println!("API key:  MISSING ({} is not set)", API_KEY_ENV);
    }
    println!("Endpoint: {}", config.api.base_url);
    println!(
        "Paging:   {} per page, up to {} pages, {}ms between requests",
        config.api.page_size, config.api.max_pages, config.api.delay_ms
    );
    println!();

    println!("{:<24} {:<16} {}", "LABEL", "QUERY TYPE", "CATEGORY");
    for query in &config.queries {
        let category = query
            .category_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        println!("{:<24} {:<16} {}", query.label, query.query_type, category);
    }

    Ok(())
}

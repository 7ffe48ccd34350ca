//! Application configuration
//!
//! Defaults are embedded as TOML; the page URL may override the start page
//! and the page size (`?page=3&page_size=24`).

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub endpoint: String,
    #[serde(default)]
    pub fields: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub page_size: u32,
    pub max_bulk_rows: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    pub selection_key: String,
}

/// Largest `limit` the artworks endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";
const DEFAULT_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
endpoint = "https://api.artic.edu/api/v1/artworks"
fields = "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end"

[table]
page_size = 12
max_bulk_rows = 1000

[storage]
selection_key = "artworks_selected_ids"
"#;

/// Startup values taken from the page URL
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct QueryOverrides {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl QueryOverrides {
    /// Parses a `location.search` string; unknown or malformed keys are ignored.
    pub fn parse(search: &str) -> Self {
        let params: std::collections::HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        Self {
            page: params.get("page").and_then(|v| v.parse().ok()),
            page_size: params.get("page_size").and_then(|v| v.parse().ok()),
        }
    }

    /// Start page, 1 when absent or zero.
    pub fn start_page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }
}

/// Load the embedded configuration and apply URL overrides
pub fn load_config(overrides: &QueryOverrides) -> anyhow::Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(DEFAULT_CONFIG)?;
    if let Some(size) = overrides.page_size {
        config.table.page_size = size;
    }
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    fn validate(&mut self) -> anyhow::Result<()> {
        if self.api.endpoint.trim().is_empty() {
            anyhow::bail!("api.endpoint must not be empty");
        }
        if self.storage.selection_key.trim().is_empty() {
            anyhow::bail!("storage.selection_key must not be empty");
        }
        if self.table.page_size == 0 || self.table.page_size > MAX_PAGE_SIZE {
            log::warn!(
                "page_size {} out of range, clamped to 1..={}",
                self.table.page_size,
                MAX_PAGE_SIZE
            );
            self.table.page_size = self.table.page_size.clamp(1, MAX_PAGE_SIZE);
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                fields: Some(DEFAULT_FIELDS.to_string()),
            },
            table: TableConfig {
                page_size: 12,
                max_bulk_rows: 1000,
            },
            storage: StorageConfig {
                selection_key: "artworks_selected_ids".to_string(),
            },
        }
    }
}

use async_trait::async_trait;
use contracts::domain::a001_artwork::{ArtworkPage, ArtworkPageQuery};
use gloo_net::http::Request;
use thiserror::Error;

use crate::shared::api_utils::page_url;
use crate::shared::config::AppConfig;

/// Failure while fetching one page from the data source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Failed to build request URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Source of artwork pages. `page` is 1-based.
#[async_trait(?Send)]
pub trait PageFetcher {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<ArtworkPage, FetchError>;
}

/// Fetches pages from the REST endpoint with `gloo-net`
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    endpoint: String,
    fields: Option<String>,
}

impl HttpPageFetcher {
    pub fn new(endpoint: impl Into<String>, fields: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fields,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api.endpoint.clone(), config.api.fields.clone())
    }
}

#[async_trait(?Send)]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<ArtworkPage, FetchError> {
        let query = ArtworkPageQuery {
            page,
            limit: page_size,
            fields: self.fields.clone(),
        };
        let url = page_url(&self.endpoint, &query)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        response
            .json::<ArtworkPage>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

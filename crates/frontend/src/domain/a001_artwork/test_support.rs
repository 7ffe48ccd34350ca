use async_trait::async_trait;
use contracts::domain::a001_artwork::{Artwork, ArtworkPage};
use std::cell::RefCell;

use super::api::{FetchError, PageFetcher};

/// Synthetic dataset served page by page; records every requested page.
pub(crate) struct FakeFetcher {
    items: Vec<Artwork>,
    fail_on: Option<u32>,
    calls: RefCell<Vec<u32>>,
}

impl FakeFetcher {
    /// Artworks with ids `1..=total`
    pub(crate) fn with_total(total: usize) -> Self {
        Self::with_items(
            (1..=total as i64)
                .map(|id| Artwork::new(id, format!("Artwork {}", id)))
                .collect(),
        )
    }

    pub(crate) fn with_items(items: Vec<Artwork>) -> Self {
        Self {
            items,
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn failing_on(mut self, page: u32) -> Self {
        self.fail_on = Some(page);
        self
    }

    pub(crate) fn calls(&self) -> Vec<u32> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PageFetcher for FakeFetcher {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<ArtworkPage, FetchError> {
        self.calls.borrow_mut().push(page);
        if self.fail_on == Some(page) {
            return Err(FetchError::Status(503));
        }
        let start = (page.saturating_sub(1) as usize) * page_size as usize;
        let data = self
            .items
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok(ArtworkPage::new(data, self.items.len() as u64))
    }
}

//! Cross-page selection: walk consecutive pages until the requested number of
//! rows is collected or the dataset runs out.

use contracts::domain::a001_artwork::Artwork;
use std::collections::HashSet;

use super::selection_set::SelectionSet;
use crate::domain::a001_artwork::api::{FetchError, PageFetcher};

/// Why an accumulation stopped
#[derive(Debug, Clone, PartialEq)]
pub enum AccumulationOutcome {
    /// Requested number of rows collected
    Satisfied,
    /// Pages ran out first
    Exhausted,
    /// Superseded by navigation or a newer request
    Cancelled,
    /// A page fetch failed; items hold what was gathered before it
    Failed { page: u32, error: FetchError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation {
    pub items: Vec<Artwork>,
    pub requested: usize,
    pub pages_fetched: u32,
    pub outcome: AccumulationOutcome,
}

impl Accumulation {
    pub fn ids(&self) -> SelectionSet {
        SelectionSet::from_items(&self.items)
    }
}

pub struct SelectionAccumulator<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    page_size: u32,
}

impl<'a, F: PageFetcher + ?Sized> SelectionAccumulator<'a, F> {
    pub fn new(fetcher: &'a F, page_size: u32) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
        }
    }

    /// Collect up to `target` distinct artworks starting at `start_page`.
    ///
    /// `is_cancelled` is polled before every fetch and after it returns.
    /// Identifiers seen earlier in the run are skipped (first occurrence wins).
    pub async fn accumulate<C>(
        &self,
        target: usize,
        start_page: u32,
        is_cancelled: C,
    ) -> Accumulation
    where
        C: Fn() -> bool,
    {
        let mut items: Vec<Artwork> = Vec::new();
        let mut seen = HashSet::new();
        let mut remaining = target;
        let mut page = start_page.max(1);
        let mut pages_fetched = 0u32;

        let finish = |items: Vec<Artwork>, pages_fetched: u32, outcome: AccumulationOutcome| {
            log::debug!(
                "accumulation stopped: {:?}, {} of {} rows, {} page(s)",
                outcome,
                items.len(),
                target,
                pages_fetched
            );
            Accumulation {
                items,
                requested: target,
                pages_fetched,
                outcome,
            }
        };

        if remaining == 0 {
            return finish(items, pages_fetched, AccumulationOutcome::Satisfied);
        }

        loop {
            if is_cancelled() {
                return finish(items, pages_fetched, AccumulationOutcome::Cancelled);
            }

            let fetched = match self.fetcher.fetch_page(page, self.page_size).await {
                Ok(fetched) => fetched,
                Err(error) => {
                    log::warn!("accumulation: page {} failed: {}", page, error);
                    let outcome = AccumulationOutcome::Failed { page, error };
                    return finish(items, pages_fetched, outcome);
                }
            };
            pages_fetched += 1;

            if is_cancelled() {
                return finish(items, pages_fetched, AccumulationOutcome::Cancelled);
            }

            let total = fetched.total();
            let page_len = fetched.data.len();
            let before = items.len();
            for artwork in fetched.data {
                if remaining == 0 {
                    break;
                }
                if seen.insert(artwork.id) {
                    items.push(artwork);
                    remaining -= 1;
                }
            }

            if remaining == 0 {
                return finish(items, pages_fetched, AccumulationOutcome::Satisfied);
            }

            let more_pages = u64::from(page) * u64::from(self.page_size) < total;
            // a non-empty page with nothing new means the source is not advancing
            let stalled = items.len() == before;
            if !more_pages || page_len == 0 || stalled {
                return finish(items, pages_fetched, AccumulationOutcome::Exhausted);
            }
            page += 1;
        }
    }
}

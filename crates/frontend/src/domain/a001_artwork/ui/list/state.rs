use contracts::domain::a001_artwork::{Artwork, ArtworkId, ArtworkPage};
use leptos::prelude::*;

use crate::domain::a001_artwork::selection::{
    parse_row_count, Accumulation, AccumulationOutcome, CoverageState, SelectionSet,
};

/// Result line shown under the bulk selection form
#[derive(Clone, Debug, PartialEq)]
pub enum BulkMessage {
    Info(String),
    Warning(String),
    Error(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtworkListState {
    pub items: Vec<Artwork>,
    pub total_records: u64,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: SelectionSet,
    // Bulk selection form
    pub bulk_input: String,
    pub bulk_panel_open: bool,
    pub bulk_running: bool,
    pub bulk_message: Option<BulkMessage>,
    // Responses carrying an older generation are dropped
    pub page_generation: u64,
    pub bulk_generation: u64,
}

#[derive(Clone, Debug)]
pub enum ArtworkListEvent {
    PageRequested(u32),
    Retry,
    PageLoaded {
        generation: u64,
        page: ArtworkPage,
        stored: Option<SelectionSet>,
    },
    PageFailed {
        generation: u64,
        error: String,
    },
    RowToggled {
        id: ArtworkId,
        checked: bool,
    },
    HeaderToggled(bool),
    SelectionCleared,
    BulkPanelToggled,
    BulkPanelClosed,
    BulkInputChanged(String),
    BulkSubmitted {
        max_rows: usize,
    },
    BulkFinished {
        generation: u64,
        accumulation: Accumulation,
    },
}

/// Work the component performs after a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    LoadPage {
        page: u32,
        page_size: u32,
        generation: u64,
    },
    Accumulate {
        target: usize,
        start_page: u32,
        page_size: u32,
        generation: u64,
    },
    PersistSelection(SelectionSet),
    ClearStoredSelection,
}

impl ArtworkListState {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_records: 0,
            page: page.max(1),
            page_size: page_size.max(1),
            loading: false,
            error: None,
            selected: SelectionSet::new(),
            bulk_input: String::new(),
            bulk_panel_open: false,
            bulk_running: false,
            bulk_message: None,
            page_generation: 0,
            bulk_generation: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_records, self.page_size)
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.items.iter().map(|a| a.id)
    }

    /// Header checkbox state by exact membership of the visible rows
    pub fn header_state(&self) -> CoverageState {
        self.selected.coverage(self.visible_ids())
    }

    /// Apply one event and return the work it requires, if any
    pub fn apply(&mut self, event: ArtworkListEvent) -> Option<Command> {
        match event {
            ArtworkListEvent::PageRequested(page) => Some(self.request_page(page)),
            ArtworkListEvent::Retry => Some(self.request_page(self.page)),
            ArtworkListEvent::PageLoaded {
                generation,
                page,
                stored,
            } => {
                if generation != self.page_generation {
                    log::debug!("dropping stale page response (generation {})", generation);
                    return None;
                }
                self.loading = false;
                self.error = None;
                self.total_records = page.total();
                if let Some(stored) = stored {
                    self.selected.extend(stored.intersect_ids(page.ids()).iter());
                }
                self.items = page.data;
                None
            }
            ArtworkListEvent::PageFailed { generation, error } => {
                if generation != self.page_generation {
                    return None;
                }
                self.loading = false;
                self.items.clear();
                self.error = Some(error);
                None
            }
            ArtworkListEvent::RowToggled { id, checked } => {
                self.selected.set(id, checked);
                Some(Command::PersistSelection(self.selected.clone()))
            }
            ArtworkListEvent::HeaderToggled(checked) => {
                let visible: Vec<ArtworkId> = self.visible_ids().collect();
                for id in visible {
                    self.selected.set(id, checked);
                }
                Some(Command::PersistSelection(self.selected.clone()))
            }
            ArtworkListEvent::SelectionCleared => {
                self.selected.clear();
                self.bulk_message = None;
                Some(Command::ClearStoredSelection)
            }
            ArtworkListEvent::BulkPanelToggled => {
                self.bulk_panel_open = !self.bulk_panel_open;
                None
            }
            ArtworkListEvent::BulkPanelClosed => {
                self.bulk_panel_open = false;
                None
            }
            ArtworkListEvent::BulkInputChanged(text) => {
                self.bulk_input = text;
                if matches!(self.bulk_message, Some(BulkMessage::Error(_))) {
                    self.bulk_message = None;
                }
                None
            }
            ArtworkListEvent::BulkSubmitted { max_rows } => {
                match parse_row_count(&self.bulk_input, max_rows) {
                    Ok(target) => {
                        self.bulk_generation += 1;
                        self.bulk_running = true;
                        self.bulk_message = None;
                        Some(Command::Accumulate {
                            target,
                            start_page: self.page,
                            page_size: self.page_size,
                            generation: self.bulk_generation,
                        })
                    }
                    Err(e) => {
                        self.bulk_message = Some(BulkMessage::Error(e.to_string()));
                        None
                    }
                }
            }
            ArtworkListEvent::BulkFinished {
                generation,
                accumulation,
            } => {
                if generation != self.bulk_generation
                    || accumulation.outcome == AccumulationOutcome::Cancelled
                {
                    log::debug!("dropping superseded accumulation (generation {})", generation);
                    return None;
                }
                self.bulk_running = false;
                let failed = matches!(accumulation.outcome, AccumulationOutcome::Failed { .. });
                // a run that failed before collecting anything leaves the selection alone
                let replace = !(failed && accumulation.items.is_empty());
                if replace {
                    self.selected = accumulation.ids();
                }
                let got = accumulation.items.len();
                let wanted = accumulation.requested;
                self.bulk_message = match &accumulation.outcome {
                    AccumulationOutcome::Failed { page, error } => Some(BulkMessage::Error(format!(
                        "Selected {} of {} rows; page {} failed: {}",
                        got, wanted, page, error
                    ))),
                    AccumulationOutcome::Exhausted => Some(BulkMessage::Warning(format!(
                        "Only {} of {} rows available from page {}",
                        got, wanted, self.page
                    ))),
                    _ => Some(BulkMessage::Info(format!("Selected {} rows", got))),
                };
                if !failed {
                    self.bulk_panel_open = false;
                }
                replace.then(|| Command::PersistSelection(self.selected.clone()))
            }
        }
    }

    fn request_page(&mut self, page: u32) -> Command {
        let last = self.total_pages();
        let page = if last > 0 { page.clamp(1, last) } else { page.max(1) };
        self.page = page;
        self.loading = true;
        self.error = None;
        self.page_generation += 1;
        if self.bulk_running {
            log::info!("page change cancels the running bulk selection");
            self.bulk_running = false;
        }
        self.bulk_generation += 1;
        Command::LoadPage {
            page,
            page_size: self.page_size,
            generation: self.page_generation,
        }
    }
}

/// Number of pages needed for `total` records
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

// Create state within component scope so it is disposed on unmount
pub fn create_state(page: u32, page_size: u32) -> RwSignal<ArtworkListState> {
    RwSignal::new(ArtworkListState::new(page, page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_artwork::api::FetchError;

    fn page_of(ids: std::ops::RangeInclusive<i64>, total: u64) -> ArtworkPage {
        ArtworkPage::new(ids.map(|id| Artwork::new(id, "t")).collect(), total)
    }

    fn loaded_state() -> ArtworkListState {
        let mut s = ArtworkListState::new(1, 12);
        let cmd = s.apply(ArtworkListEvent::PageRequested(1));
        let generation = match cmd {
            Some(Command::LoadPage { generation, .. }) => generation,
            other => panic!("unexpected {:?}", other),
        };
        s.apply(ArtworkListEvent::PageLoaded {
            generation,
            page: page_of(1..=12, 30),
            stored: None,
        });
        s
    }

    fn accumulation(
        ids: std::ops::RangeInclusive<i64>,
        requested: usize,
        outcome: AccumulationOutcome,
    ) -> Accumulation {
        Accumulation {
            items: ids.map(|id| Artwork::new(id, "t")).collect(),
            requested,
            pages_fetched: 1,
            outcome,
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(30, 12), 3);
        assert_eq!(total_pages(30, 0), 0);
    }

    #[test]
    fn test_page_request_emits_load() {
        let mut s = ArtworkListState::new(1, 12);
        let cmd = s.apply(ArtworkListEvent::PageRequested(4));
        assert_eq!(
            cmd,
            Some(Command::LoadPage {
                page: 4,
                page_size: 12,
                generation: 1
            })
        );
        assert!(s.loading);
    }

    #[test]
    fn test_page_request_is_clamped_once_total_known() {
        let mut s = loaded_state();
        assert_eq!(s.total_pages(), 3);
        let cmd = s.apply(ArtworkListEvent::PageRequested(10));
        assert!(matches!(cmd, Some(Command::LoadPage { page: 3, .. })));
        let cmd = s.apply(ArtworkListEvent::PageRequested(0));
        assert!(matches!(cmd, Some(Command::LoadPage { page: 1, .. })));
    }

    #[test]
    fn test_stale_page_response_is_dropped() {
        let mut s = ArtworkListState::new(1, 12);
        s.apply(ArtworkListEvent::PageRequested(1));
        s.apply(ArtworkListEvent::PageRequested(2));
        s.apply(ArtworkListEvent::PageLoaded {
            generation: 1,
            page: page_of(1..=12, 30),
            stored: None,
        });
        assert!(s.items.is_empty());
        assert!(s.loading);

        s.apply(ArtworkListEvent::PageLoaded {
            generation: 2,
            page: page_of(13..=24, 30),
            stored: None,
        });
        assert_eq!(s.items.len(), 12);
        assert_eq!(s.items[0].id, 13);
        assert!(!s.loading);
    }

    #[test]
    fn test_page_load_rehydrates_stored_intersection() {
        let mut s = ArtworkListState::new(2, 12);
        s.selected.insert(500);
        s.apply(ArtworkListEvent::PageRequested(2));
        let stored: SelectionSet = [1, 14, 20, 99].into_iter().collect();
        s.apply(ArtworkListEvent::PageLoaded {
            generation: 1,
            page: page_of(13..=24, 30),
            stored: Some(stored),
        });
        assert_eq!(s.selected.to_vec(), vec![14, 20, 500]);
        assert_eq!(s.header_state(), CoverageState::Indeterminate);
    }

    #[test]
    fn test_page_failure_shows_error_and_retry_reloads() {
        let mut s = ArtworkListState::new(3, 12);
        s.apply(ArtworkListEvent::PageRequested(3));
        s.apply(ArtworkListEvent::PageFailed {
            generation: 1,
            error: "Network error: offline".to_string(),
        });
        assert!(!s.loading);
        assert_eq!(s.error.as_deref(), Some("Network error: offline"));

        let cmd = s.apply(ArtworkListEvent::Retry);
        assert!(matches!(cmd, Some(Command::LoadPage { page: 3, generation: 2, .. })));
        assert_eq!(s.error, None);
    }

    #[test]
    fn test_row_toggle_persists() {
        let mut s = loaded_state();
        let cmd = s.apply(ArtworkListEvent::RowToggled { id: 5, checked: true });
        assert_eq!(cmd, Some(Command::PersistSelection([5].into_iter().collect())));
        s.apply(ArtworkListEvent::RowToggled { id: 5, checked: false });
        assert!(s.selected.is_empty());
    }

    #[test]
    fn test_header_toggle_is_page_scoped_union() {
        let mut s = loaded_state();
        s.selected.insert(100);
        s.apply(ArtworkListEvent::HeaderToggled(true));
        assert_eq!(s.header_state(), CoverageState::Checked);
        assert_eq!(s.selected.len(), 13);

        s.apply(ArtworkListEvent::HeaderToggled(false));
        assert_eq!(s.selected.to_vec(), vec![100]);
        assert_eq!(s.header_state(), CoverageState::Unchecked);
    }

    #[test]
    fn test_invalid_bulk_input_does_not_fetch() {
        let mut s = loaded_state();
        s.apply(ArtworkListEvent::BulkInputChanged("abc".to_string()));
        let cmd = s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 1000 });
        assert_eq!(cmd, None);
        assert!(matches!(s.bulk_message, Some(BulkMessage::Error(_))));
        assert!(!s.bulk_running);

        // editing clears the validation message
        s.apply(ArtworkListEvent::BulkInputChanged("3".to_string()));
        assert_eq!(s.bulk_message, None);
    }

    #[test]
    fn test_bulk_submit_starts_from_current_page() {
        let mut s = loaded_state();
        s.page = 2;
        s.apply(ArtworkListEvent::BulkInputChanged(" 25 ".to_string()));
        let cmd = s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 1000 });
        assert_eq!(
            cmd,
            Some(Command::Accumulate {
                target: 25,
                start_page: 2,
                page_size: 12,
                generation: s.bulk_generation
            })
        );
        assert!(s.bulk_running);
    }

    #[test]
    fn test_bulk_result_replaces_selection_and_closes_panel() {
        let mut s = loaded_state();
        s.selected.insert(999);
        s.bulk_panel_open = true;
        s.bulk_input = "3".to_string();
        let generation = match s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 10 }) {
            Some(Command::Accumulate { generation, .. }) => generation,
            other => panic!("unexpected {:?}", other),
        };
        let cmd = s.apply(ArtworkListEvent::BulkFinished {
            generation,
            accumulation: accumulation(1..=3, 3, AccumulationOutcome::Satisfied),
        });
        assert_eq!(s.selected.to_vec(), vec![1, 2, 3]);
        assert_eq!(cmd, Some(Command::PersistSelection(s.selected.clone())));
        assert!(!s.bulk_panel_open);
        assert!(!s.bulk_running);
        assert_eq!(s.bulk_message, Some(BulkMessage::Info("Selected 3 rows".to_string())));
    }

    #[test]
    fn test_bulk_failure_keeps_partial_and_panel_open() {
        let mut s = loaded_state();
        s.bulk_panel_open = true;
        s.bulk_input = "40".to_string();
        s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 100 });
        let generation = s.bulk_generation;
        s.apply(ArtworkListEvent::BulkFinished {
            generation,
            accumulation: accumulation(
                1..=24,
                40,
                AccumulationOutcome::Failed {
                    page: 3,
                    error: FetchError::Status(503),
                },
            ),
        });
        assert_eq!(s.selected.len(), 24);
        assert!(s.bulk_panel_open);
        match &s.bulk_message {
            Some(BulkMessage::Error(msg)) => {
                assert!(msg.starts_with("Selected 24 of 40 rows; page 3 failed"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bulk_failure_before_any_row_keeps_existing_selection() {
        let mut s = loaded_state();
        for id in [3, 500, 900] {
            s.apply(ArtworkListEvent::RowToggled { id, checked: true });
        }
        s.bulk_panel_open = true;
        s.bulk_input = "5".to_string();
        s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 100 });
        let generation = s.bulk_generation;
        let cmd = s.apply(ArtworkListEvent::BulkFinished {
            generation,
            accumulation: Accumulation {
                items: Vec::new(),
                requested: 5,
                pages_fetched: 0,
                outcome: AccumulationOutcome::Failed {
                    page: 1,
                    error: FetchError::Network("offline".to_string()),
                },
            },
        });
        assert_eq!(cmd, None);
        assert_eq!(s.selected.to_vec(), vec![3, 500, 900]);
        assert!(!s.bulk_running);
        assert!(s.bulk_panel_open);
        assert!(matches!(s.bulk_message, Some(BulkMessage::Error(_))));
    }

    #[test]
    fn test_exhausted_bulk_reports_shortfall() {
        let mut s = loaded_state();
        s.bulk_input = "50".to_string();
        s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 100 });
        let generation = s.bulk_generation;
        s.apply(ArtworkListEvent::BulkFinished {
            generation,
            accumulation: accumulation(1..=30, 50, AccumulationOutcome::Exhausted),
        });
        assert_eq!(
            s.bulk_message,
            Some(BulkMessage::Warning("Only 30 of 50 rows available from page 1".to_string()))
        );
    }

    #[test]
    fn test_navigation_discards_running_bulk() {
        let mut s = loaded_state();
        s.selected.insert(7);
        s.bulk_input = "20".to_string();
        s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 100 });
        let generation = s.bulk_generation;

        s.apply(ArtworkListEvent::PageRequested(2));
        assert!(!s.bulk_running);

        let cmd = s.apply(ArtworkListEvent::BulkFinished {
            generation,
            accumulation: accumulation(1..=20, 20, AccumulationOutcome::Satisfied),
        });
        assert_eq!(cmd, None);
        assert_eq!(s.selected.to_vec(), vec![7]);
    }

    #[test]
    fn test_newer_bulk_supersedes_older() {
        let mut s = loaded_state();
        s.bulk_input = "5".to_string();
        s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 100 });
        let first = s.bulk_generation;
        s.bulk_input = "2".to_string();
        s.apply(ArtworkListEvent::BulkSubmitted { max_rows: 100 });
        let second = s.bulk_generation;

        s.apply(ArtworkListEvent::BulkFinished {
            generation: second,
            accumulation: accumulation(1..=2, 2, AccumulationOutcome::Satisfied),
        });
        s.apply(ArtworkListEvent::BulkFinished {
            generation: first,
            accumulation: accumulation(1..=5, 5, AccumulationOutcome::Satisfied),
        });
        assert_eq!(s.selected.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_clear_selection() {
        let mut s = loaded_state();
        s.apply(ArtworkListEvent::HeaderToggled(true));
        let cmd = s.apply(ArtworkListEvent::SelectionCleared);
        assert_eq!(cmd, Some(Command::ClearStoredSelection));
        assert!(s.selected.is_empty());
    }
}

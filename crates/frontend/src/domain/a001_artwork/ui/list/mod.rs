pub mod bulk_select_panel;
pub mod state;

use self::bulk_select_panel::BulkSelectPanel;
use self::state::{create_state, ArtworkListEvent, ArtworkListState, Command};
use crate::domain::a001_artwork::api::{HttpPageFetcher, PageFetcher};
use crate::domain::a001_artwork::selection::{SelectionAccumulator, SelectionStore};
use crate::shared::api_utils::replace_page_in_url;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::shared::storage::LocalStorage;
use contracts::domain::a001_artwork::ArtworkId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const TABLE_ID: &str = "a001-artworks-table";

fn text_or_dash(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "—".to_string(),
    }
}

fn selection_store(config: &AppConfig) -> SelectionStore<LocalStorage> {
    SelectionStore::new(LocalStorage, config.storage.selection_key.clone())
}

/// Handles shared by the event loop of one list instance
#[derive(Clone, Copy)]
struct ListContext {
    state: RwSignal<ArtworkListState>,
    config: StoredValue<AppConfig>,
}

/// Apply an event to the state and run whatever it asks for.
/// Events arriving after the list is unmounted are dropped.
fn dispatch(ctx: ListContext, event: ArtworkListEvent) {
    let command = ctx.state.try_update(|s| s.apply(event)).flatten();
    if let Some(command) = command {
        run_command(ctx, command);
    }
}

fn run_command(ctx: ListContext, command: Command) {
    match command {
        Command::LoadPage {
            page,
            page_size,
            generation,
        } => {
            replace_page_in_url(page);
            spawn_local(async move {
                let config = ctx.config.get_value();
                let fetcher = HttpPageFetcher::from_config(&config);
                let event = match fetcher.fetch_page(page, page_size).await {
                    Ok(fetched) => {
                        log::info!(
                            "Loaded page {} ({} rows of {})",
                            page,
                            fetched.data.len(),
                            fetched.total()
                        );
                        let stored = selection_store(&config).load_or_warn();
                        ArtworkListEvent::PageLoaded {
                            generation,
                            page: fetched,
                            stored,
                        }
                    }
                    Err(e) => {
                        log::error!("Error fetching page {}: {}", page, e);
                        ArtworkListEvent::PageFailed {
                            generation,
                            error: e.to_string(),
                        }
                    }
                };
                dispatch(ctx, event);
            });
        }
        Command::Accumulate {
            target,
            start_page,
            page_size,
            generation,
        } => {
            log::info!("Selecting {} rows starting from page {}", target, start_page);
            spawn_local(async move {
                let config = ctx.config.get_value();
                let fetcher = HttpPageFetcher::from_config(&config);
                let is_cancelled = move || {
                    ctx.state
                        .try_with_untracked(|s| s.bulk_generation != generation)
                        .unwrap_or(true)
                };
                let accumulation = SelectionAccumulator::new(&fetcher, page_size)
                    .accumulate(target, start_page, is_cancelled)
                    .await;
                log::info!(
                    "Bulk selection finished: {} of {} rows, {} page(s)",
                    accumulation.items.len(),
                    accumulation.requested,
                    accumulation.pages_fetched
                );
                dispatch(
                    ctx,
                    ArtworkListEvent::BulkFinished {
                        generation,
                        accumulation,
                    },
                );
            });
        }
        Command::PersistSelection(selection) => {
            let config = ctx.config.get_value();
            if let Err(e) = selection_store(&config).save(&selection) {
                log::warn!("Failed to persist selection: {}", e);
            }
        }
        Command::ClearStoredSelection => {
            let config = ctx.config.get_value();
            selection_store(&config).clear();
            log::info!("Selection cleared");
        }
    }
}

#[component]
pub fn ArtworkList(
    /// Page shown first (1-based)
    #[prop(default = 1)]
    start_page: u32,
) -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not found in context");
    let max_bulk_rows = config.table.max_bulk_rows;
    let state = create_state(start_page, config.table.page_size);
    let ctx = ListContext {
        state,
        config: StoredValue::new(config),
    };

    Effect::new(move |_| {
        if state.with_untracked(|s| s.page_generation == 0) {
            dispatch(ctx, ArtworkListEvent::PageRequested(start_page));
        }
    });

    let loading = Signal::derive(move || state.with(|s| s.loading));
    let visible_ids =
        Signal::derive(move || state.with(|s| s.visible_ids().collect::<Vec<ArtworkId>>()));
    let selected = Signal::derive(move || state.with(|s| s.selected.clone()));
    let selected_count = Signal::derive(move || state.with(|s| s.selected.len()));
    let bulk_open = Signal::derive(move || state.with(|s| s.bulk_panel_open));
    let show_empty = move || {
        !loading.get() && state.with(|s| s.items.is_empty() && s.error.is_none())
    };

    let go_to_page = move |page: u32| dispatch(ctx, ArtworkListEvent::PageRequested(page));
    let toggle_row = move |(id, checked): (ArtworkId, bool)| {
        dispatch(ctx, ArtworkListEvent::RowToggled { id, checked })
    };
    let toggle_all = move |checked: bool| dispatch(ctx, ArtworkListEvent::HeaderToggled(checked));

    view! {
        <div class="page" id="a001_artwork--list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Artworks"</h1>
                    <span class="page__badge">
                        {move || state.with(|s| s.total_records.to_string())}
                    </span>
                </div>
                <div class="page__header-right">
                    <span class="page__status">
                        {move || format!("Selected: {}", selected_count.get())}
                    </span>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| dispatch(ctx, ArtworkListEvent::SelectionCleared)
                        disabled=Signal::derive(move || selected_count.get() == 0)
                    >
                        "Clear selection"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| dispatch(ctx, ArtworkListEvent::Retry)
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    state.with(|s| s.error.clone()).map(|err| view! {
                        <div class="alert alert--error">
                            <span>{err}</span>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| dispatch(ctx, ArtworkListEvent::Retry)
                            >
                                "Retry"
                            </Button>
                        </div>
                    })
                }}

                <div class="table-wrapper">
                    <Show when=move || bulk_open.get()>
                        <BulkSelectPanel
                            value=Signal::derive(move || state.with(|s| s.bulk_input.clone()))
                            running=Signal::derive(move || state.with(|s| s.bulk_running))
                            message=Signal::derive(move || state.with(|s| s.bulk_message.clone()))
                            on_input=Callback::new(move |text: String| {
                                dispatch(ctx, ArtworkListEvent::BulkInputChanged(text))
                            })
                            on_submit=Callback::new(move |_| {
                                dispatch(
                                    ctx,
                                    ArtworkListEvent::BulkSubmitted { max_rows: max_bulk_rows },
                                )
                            })
                            on_close=Callback::new(move |_| {
                                dispatch(ctx, ArtworkListEvent::BulkPanelClosed)
                            })
                        />
                    </Show>

                    <Show when=move || loading.get()>
                        <div class="table-wrapper__loading">
                            <Spinner />
                        </div>
                    </Show>

                    <Table attr:id=TABLE_ID attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    visible_ids=visible_ids
                                    selected=selected
                                    on_change=Callback::new(toggle_all)
                                    on_expand=Callback::new(move |_| {
                                        dispatch(ctx, ArtworkListEvent::BulkPanelToggled)
                                    })
                                    expanded=bulk_open
                                />
                                <TableHeaderCell min_width=200.0>"Title"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Place of Origin"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Artist"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Inscriptions"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Start Date"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"End Date"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.with(|s| s.items.clone())
                                key=|item| item.id
                                children=move |item| {
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=item.id
                                                selected=selected
                                                on_change=Callback::new(toggle_row)
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>{text_or_dash(&item.title)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{text_or_dash(&item.place_of_origin)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{text_or_dash(&item.artist_display)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{text_or_dash(&item.inscriptions)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{text_or_dash(&item.date_start)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{text_or_dash(&item.date_end)}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=show_empty>
                        <div class="table-wrapper__empty">"No artworks found"</div>
                    </Show>
                </div>

                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_pages=Signal::derive(move || state.with(|s| s.total_pages()))
                    total_count=Signal::derive(move || state.with(|s| s.total_records))
                    page_size=Signal::derive(move || state.with(|s| s.page_size))
                    on_page_change=Callback::new(go_to_page)
                    disabled=loading
                />
            </div>
        </div>
    }
}

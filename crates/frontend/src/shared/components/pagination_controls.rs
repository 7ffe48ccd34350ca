use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page links shown around the current page
const PAGE_LINKS: u32 = 5;

/// Window of at most `span` page numbers containing `current`, kept inside `1..=total_pages`.
pub fn visible_page_numbers(current: u32, total_pages: u32, span: u32) -> Vec<u32> {
    if total_pages == 0 || span == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let span = span.min(total_pages);
    let half = span / 2;
    let mut first = current.saturating_sub(half).max(1);
    if first + span - 1 > total_pages {
        first = total_pages - span + 1;
    }
    (first..first + span).collect()
}

/// "13–24 of 30"
pub fn range_label(page: u32, page_size: u32, total: u64) -> String {
    if total == 0 {
        return "0 of 0".to_string();
    }
    let first = u64::from(page.saturating_sub(1)) * u64::from(page_size) + 1;
    let last = (first + u64::from(page_size) - 1).min(total);
    format!("{}–{} of {}", first.min(total), last, total)
}

/// First / prev / page numbers / next / last
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Total count of records
    #[prop(into)]
    total_count: Signal<u64>,

    /// Rows per page
    #[prop(into)]
    page_size: Signal<u32>,

    /// Callback when page changes
    on_page_change: Callback<u32>,

    /// Disable every button (while a page is loading)
    #[prop(into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let is_disabled = move || disabled.get();
    let at_start = move || is_disabled() || current_page.get() <= 1;
    let at_end = move || is_disabled() || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_start
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=at_start
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                let current = current_page.get();
                visible_page_numbers(current, total_pages.get(), PAGE_LINKS)
                    .into_iter()
                    .map(|page| {
                        let class = if page == current {
                            "pagination-btn pagination-btn--active"
                        } else {
                            "pagination-btn"
                        };
                        view! {
                            <button
                                class=class
                                on:click=move |_| on_page_change.run(page)
                                disabled=is_disabled
                            >
                                {page.to_string()}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=at_end
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total);
                    }
                }
                disabled=at_end
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <span class="pagination-info">
                {move || range_label(current_page.get(), page_size.get(), total_count.get())}
            </span>
        </div>
    }
}

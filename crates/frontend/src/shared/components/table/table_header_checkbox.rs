//! Header cell with the "select all on this page" checkbox and the chevron
//! that opens the bulk selection form.
//!
//! ```rust,ignore
//! <TableHeaderCheckbox
//!     visible_ids=visible_ids
//!     selected=selected
//!     on_change=Callback::new(move |check_all: bool| { /* ... */ })
//!     on_expand=Callback::new(move |_| open_bulk_form())
//! />
//! ```

use contracts::domain::a001_artwork::ArtworkId;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::domain::a001_artwork::selection::{CoverageState, SelectionSet};
use crate::shared::icons::icon;

/// Shows unchecked / checked / indeterminate from exact membership of the
/// visible ids in the selection.
#[component]
pub fn TableHeaderCheckbox(
    /// Identifiers of the rows currently on screen
    #[prop(into)]
    visible_ids: Signal<Vec<ArtworkId>>,

    #[prop(into)]
    selected: Signal<SelectionSet>,

    /// true = select visible rows, false = unselect visible rows
    on_change: Callback<bool>,

    /// Chevron click
    on_expand: Callback<()>,

    /// Highlights the chevron while the form is open
    #[prop(into)]
    expanded: Signal<bool>,
) -> impl IntoView {
    let checkbox_state = Signal::derive(move || {
        let ids = visible_ids.get();
        selected.with(|sel| sel.coverage(ids))
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate is a DOM property only
    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            let state = checkbox_state.get();
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(matches!(state, CoverageState::Indeterminate));
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <div class="table__header-select">
                <input
                    node_ref=checkbox_ref
                    type="checkbox"
                    class="table__checkbox"
                    title="Select all rows on this page"
                    prop:checked=move || matches!(checkbox_state.get(), CoverageState::Checked)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        on_change.run(checked);
                    }
                />
                <button
                    class=move || if expanded.get() {
                        "table__header-expand table__header-expand--open"
                    } else {
                        "table__header-expand"
                    }
                    title="Select a number of rows"
                    on:click=move |e| {
                        e.stop_propagation();
                        on_expand.run(());
                    }
                >
                    {icon("chevron-down")}
                </button>
            </div>
        </TableHeaderCell>
    }
}

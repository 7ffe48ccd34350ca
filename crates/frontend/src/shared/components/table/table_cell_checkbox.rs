//! Row checkbox reflecting membership of one identifier in the selection
//!
//! ```rust,ignore
//! <TableCellCheckbox
//!     item_id=row.id
//!     selected=selected
//!     on_change=Callback::new(move |(id, checked)| toggle_select(id, checked))
//! />
//! ```

use contracts::domain::a001_artwork::ArtworkId;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_artwork::selection::SelectionSet;

/// Stops click propagation so the row itself does not react
#[component]
pub fn TableCellCheckbox(
    item_id: ArtworkId,

    #[prop(into)]
    selected: Signal<SelectionSet>,

    /// Called with (item_id, checked)
    on_change: Callback<(ArtworkId, bool)>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.with(|s| s.contains(item_id))
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run((item_id, checked));
                }
            />
        </TableCell>
    }
}

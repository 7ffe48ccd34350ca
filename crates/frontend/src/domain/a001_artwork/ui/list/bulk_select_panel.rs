use leptos::prelude::*;

use super::state::BulkMessage;
use crate::shared::icons::icon;

/// Popover form: number of rows to select starting from the current page
#[component]
pub fn BulkSelectPanel(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    running: Signal<bool>,
    #[prop(into)]
    message: Signal<Option<BulkMessage>>,
    on_input: Callback<String>,
    on_submit: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="bulk-select-panel" on:click=|e| e.stop_propagation()>
            <div class="bulk-select-panel__header">
                <span class="bulk-select-panel__title">"Select rows"</span>
                <button
                    class="bulk-select-panel__close"
                    title="Close"
                    on:click=move |_| on_close.run(())
                >
                    {icon("x")}
                </button>
            </div>
            <form
                class="bulk-select-panel__form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    if !running.get_untracked() {
                        on_submit.run(());
                    }
                }
            >
                <input
                    type="number"
                    min="0"
                    step="1"
                    class="form__input"
                    placeholder="Enter row number"
                    prop:value=move || value.get()
                    on:input=move |ev| on_input.run(event_target_value(&ev))
                    disabled=move || running.get()
                />
                <button
                    type="submit"
                    class="button button--primary"
                    disabled=move || running.get()
                >
                    {move || if running.get() { "Selecting..." } else { "Submit" }}
                </button>
            </form>
            {move || {
                message.get().map(|msg| {
                    let (class, text) = match msg {
                        BulkMessage::Info(text) => ("bulk-select-panel__message", text),
                        BulkMessage::Warning(text) => {
                            ("bulk-select-panel__message bulk-select-panel__message--warning", text)
                        }
                        BulkMessage::Error(text) => {
                            ("bulk-select-panel__message bulk-select-panel__message--error", text)
                        }
                    };
                    view! { <div class=class>{text}</div> }
                })
            }}
        </div>
    }
}

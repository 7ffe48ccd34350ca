use crate::domain::a001_artwork::ui::list::ArtworkList;
use crate::shared::api_utils::current_search;
use crate::shared::config::{load_config, AppConfig, QueryOverrides};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let overrides = QueryOverrides::parse(&current_search());
    let config = load_config(&overrides).unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {}", e);
        AppConfig::default()
    });
    log::debug!("Configuration: {:?}", config);

    // Provide the configuration to the whole app via context.
    provide_context(config);

    view! {
        <main class="app">
            <ArtworkList start_page=overrides.start_page() />
        </main>
    }
}

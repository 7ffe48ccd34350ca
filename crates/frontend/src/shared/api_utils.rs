//! URL helpers for the artworks endpoint and the page's own address bar.

use contracts::domain::a001_artwork::ArtworkPageQuery;
use std::collections::HashMap;
use web_sys::window;

/// Build the request URL for one page of the data source
///
/// # Example
/// ```rust,ignore
/// let url = page_url("https://api.artic.edu/api/v1/artworks", &query)?;
/// // https://api.artic.edu/api/v1/artworks?page=2&limit=12
/// ```
pub fn page_url(endpoint: &str, query: &ArtworkPageQuery) -> Result<String, serde_qs::Error> {
    let query_string = serde_qs::to_string(query)?;
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", endpoint, separator, query_string))
}

/// Current `location.search`, empty outside the browser
pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Mirror the current page into `?page=N` without adding a history entry
pub fn replace_page_in_url(page: u32) {
    let mut params: HashMap<String, String> =
        serde_qs::from_str(current_search().trim_start_matches('?')).unwrap_or_default();
    params.insert("page".to_string(), page.to_string());
    let query_string = serde_qs::to_string(&params).unwrap_or_default();
    let new_url = format!("?{}", query_string);

    if current_search() == new_url {
        return;
    }
    if let Some(w) = window() {
        if let Ok(history) = w.history() {
            let _ = history.replace_state_with_url(
                &wasm_bindgen::JsValue::NULL,
                "",
                Some(&new_url),
            );
        }
    }
}

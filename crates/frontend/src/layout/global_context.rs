use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Section shown when the URL does not name one
pub const DEFAULT_SECTION: &str = "a001_user";

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Key of the section in the content area (e.g. "a003_currency")
    pub active: RwSignal<String>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(DEFAULT_SECTION.to_string()),
            left_open: RwSignal::new(true),
        }
    }

    /// Restores the active section from `?active=...` and keeps the query
    /// string in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(active_key) = parse_active(&search) {
            self.activate(&active_key);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = active_query(&this.active.get());

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
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
        });
    }

    pub fn activate(&self, key: &str) {
        log::debug!("activate section: {}", key);
        self.active.set(key.to_string());
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.with(|active| active == key)
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads `active` from a location search string (`?active=a002_role`)
pub fn parse_active(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|v| !v.is_empty()).cloned()
}

/// Search string for the given section, including the leading `?`
pub fn active_query(key: &str) -> String {
    let query_string =
        serde_qs::to_string(&HashMap::from([("active".to_string(), key.to_string())]))
            .unwrap_or_default();
    format!("?{}", query_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_active_section_from_search() {
        assert_eq!(parse_active("?active=a002_role").as_deref(), Some("a002_role"));
        assert_eq!(parse_active(""), None);
        assert_eq!(parse_active("?active="), None);
        assert_eq!(parse_active("?other=1"), None);
    }

    #[test]
    fn builds_search_string() {
        assert_eq!(active_query("a004_crypto_asset"), "?active=a004_crypto_asset");
        assert_eq!(
            parse_active(&active_query("a005_payment_method")).as_deref(),
            Some("a005_payment_method")
        );
    }
}

use crate::system::auth::storage;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

pub const PAGE_TRANSFERS_OUTGOING: &str = "a002_transfers_outgoing";
pub const PAGE_TRANSFERS_INCOMING: &str = "a002_transfers_incoming";
pub const PAGE_EXPORT_REQUESTS: &str = "a003_export_request";
pub const PAGE_EXPORT_RECEIPTS: &str = "a004_export_receipt";

pub const DEFAULT_PAGE: &str = PAGE_TRANSFERS_OUTGOING;

/// Все страницы консоли в порядке меню
pub const PAGES: [&str; 4] = [
    PAGE_TRANSFERS_OUTGOING,
    PAGE_TRANSFERS_INCOMING,
    PAGE_EXPORT_REQUESTS,
    PAGE_EXPORT_RECEIPTS,
];

pub fn page_label(key: &str) -> &'static str {
    match key {
        PAGE_TRANSFERS_OUTGOING => "Chuyển kho đi",
        PAGE_TRANSFERS_INCOMING => "Chuyển kho đến",
        PAGE_EXPORT_REQUESTS => "Yêu cầu xuất kho",
        PAGE_EXPORT_RECEIPTS => "Phiếu xuất kho",
        _ => "Không rõ",
    }
}

pub fn is_known_page(key: &str) -> bool {
    PAGES.contains(&key)
}

/// Состояние, которое переживает перезагрузку страницы через `?active=..&warehouse=..`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<i64>,
}

impl LocationState {
    pub fn parse(search: &str) -> Self {
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
    }

    pub fn to_search(&self) -> String {
        let query = serde_qs::to_string(self).unwrap_or_default();
        if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query)
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Ключ открытой страницы
    pub active: RwSignal<String>,
    pub left_open: RwSignal<bool>,
    /// Склад, от лица которого показываются перемещения
    pub warehouse_id: RwSignal<Option<i64>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(DEFAULT_PAGE.to_string()),
            left_open: RwSignal::new(true),
            warehouse_id: RwSignal::new(None),
        }
    }

    /// Восстановить страницу и склад из URL (склад также из localStorage)
    /// и дальше держать URL в синхроне
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let restored = LocationState::parse(&search);
        if let Some(key) = restored.active.filter(|k| is_known_page(k)) {
            self.active.set(key);
        }
        let warehouse = restored.warehouse.or_else(storage::get_last_warehouse);
        if warehouse.is_some() {
            self.warehouse_id.set(warehouse);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_search = LocationState {
                active: Some(this.active.get()),
                warehouse: this.warehouse_id.get(),
            }
            .to_search();

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_search {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_search),
                        );
                    }
                }
            }
        });
    }

    pub fn open_page(&self, key: &str) {
        if is_known_page(key) {
            log::debug!("open page {}", key);
            self.active.set(key.to_string());
        }
    }

    pub fn select_warehouse(&self, warehouse_id: Option<i64>) {
        storage::save_last_warehouse(warehouse_id);
        self.warehouse_id.set(warehouse_id);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_state_roundtrip() {
        let state = LocationState {
            active: Some(PAGE_EXPORT_RECEIPTS.to_string()),
            warehouse: Some(7),
        };
        let search = state.to_search();
        assert!(search.starts_with('?'));
        assert_eq!(LocationState::parse(&search), state);
    }

    #[test]
    fn test_location_state_tolerates_garbage() {
        assert_eq!(LocationState::parse(""), LocationState::default());
        assert_eq!(LocationState::parse("?warehouse=abc").warehouse, None);
        assert_eq!(LocationState::default().to_search(), "");
    }

    #[test]
    fn test_page_labels() {
        for key in PAGES {
            assert!(is_known_page(key));
            assert_ne!(page_label(key), "Không rõ");
        }
        assert!(!is_known_page("a999_unknown"));
    }
}

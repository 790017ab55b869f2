//! Справочник складов, загружаемый один раз после входа.

use contracts::domain::a001_warehouse::aggregate::Warehouse;
use contracts::domain::a001_warehouse::lookup::WarehouseLookup;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api_client::ApiClient;
use crate::shared::notifications::NotificationService;

#[derive(Clone, Copy)]
pub struct WarehouseStore {
    pub items: RwSignal<Vec<Warehouse>>,
    pub loaded: RwSignal<bool>,
}

impl WarehouseStore {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            loaded: RwSignal::new(false),
        }
    }

    pub fn lookup(&self) -> WarehouseLookup {
        self.items.with(|items| WarehouseLookup::new(items))
    }

    /// Варианты для выпадающих списков: (id, «код · наименование»)
    pub fn options(&self) -> Vec<(String, String)> {
        self.items.with(|items| warehouse_options(items))
    }

    /// Загрузить справочник; `on_loaded` получает список после успеха
    pub fn load(
        &self,
        client: ApiClient,
        notifications: NotificationService,
        on_loaded: impl FnOnce(&[Warehouse]) + 'static,
    ) {
        let store = *self;
        spawn_local(async move {
            match api::fetch_warehouses(&client).await {
                Ok(items) => {
                    log::debug!("loaded {} warehouses", items.len());
                    on_loaded(&items);
                    store.items.set(items);
                    store.loaded.set(true);
                }
                Err(e) => notifications.error("Không tải được danh sách kho", &e),
            }
        });
    }
}

impl Default for WarehouseStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn warehouse_options(items: &[Warehouse]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|w| (w.id.to_string(), format!("{} · {}", w.code, w.name)))
        .collect()
}

pub fn use_warehouses() -> WarehouseStore {
    use_context::<WarehouseStore>().expect("WarehouseStore not found in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_options() {
        let items = vec![Warehouse {
            id: 3,
            code: "KHO-DN".into(),
            name: "Kho Đà Nẵng".into(),
            address: None,
        }];
        assert_eq!(
            warehouse_options(&items),
            vec![("3".to_string(), "KHO-DN · Kho Đà Nẵng".to_string())]
        );
    }
}

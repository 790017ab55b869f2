use leptos::prelude::*;

use crate::domain::a001_warehouse::store::use_warehouses;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::select::Select;
use crate::shared::icons::icon;

/// Выбор склада, от лица которого открыты списки перемещений
#[component]
pub fn WarehouseSelector() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let store = use_warehouses();

    let value = Signal::derive(move || {
        ctx.warehouse_id
            .get()
            .map(|id| id.to_string())
            .unwrap_or_default()
    });

    view! {
        <div class="top-header__warehouse">
            {icon("warehouse")}
            <Select
                value=value
                on_change=Callback::new(move |raw: String| ctx.select_warehouse(raw.parse::<i64>().ok()))
                options=Signal::derive(move || store.options())
                placeholder="— Chọn kho —"
                disabled=Signal::derive(move || !store.loaded.get())
            />
        </div>
    }
}

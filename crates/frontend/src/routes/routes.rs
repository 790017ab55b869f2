use crate::domain::a001_warehouse::store::WarehouseStore;
use crate::domain::a002_warehouse_transfer::ui::list::TransferList;
use crate::domain::a003_export_request::ui::list::ExportRequestList;
use crate::domain::a004_export_receipt::ui::list::ExportReceiptList;
use crate::layout::global_context::{
    AppGlobalContext, PAGE_EXPORT_RECEIPTS, PAGE_EXPORT_REQUESTS, PAGE_TRANSFERS_INCOMING,
    PAGE_TRANSFERS_OUTGOING,
};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::shared::notifications::use_notifications;
use crate::system::auth::context::{use_api_client, use_auth};
use crate::system::pages::login::LoginPage;
use contracts::domain::a002_warehouse_transfer::status::TransferDirection;
use leptos::prelude::*;

/// Страница по ключу из меню
fn render_page(key: &str) -> AnyView {
    match key {
        PAGE_TRANSFERS_OUTGOING => view! { <TransferList direction=TransferDirection::Outgoing /> }.into_any(),
        PAGE_TRANSFERS_INCOMING => view! { <TransferList direction=TransferDirection::Incoming /> }.into_any(),
        PAGE_EXPORT_REQUESTS => view! { <ExportRequestList /> }.into_any(),
        PAGE_EXPORT_RECEIPTS => view! { <ExportReceiptList /> }.into_any(),
        other => {
            log::warn!("unknown page key {}", other);
            view! { <div class="page">"Không tìm thấy trang"</div> }.into_any()
        }
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    ctx.init_router_integration();

    let warehouses = WarehouseStore::new();
    provide_context(warehouses);

    // без выбранного склада списки перемещений пусты, берём первый;
    // склад из localStorage мог быть удалён
    warehouses.load(
        use_api_client().get_untracked(),
        use_notifications(),
        move |items| {
            let current = ctx.warehouse_id.get_untracked();
            if !current.is_some_and(|id| items.iter().any(|w| w.id == id)) {
                ctx.select_warehouse(items.first().map(|w| w.id));
            }
        },
    );

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || view! {
                {move || render_page(&ctx.active.get())}
            }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}

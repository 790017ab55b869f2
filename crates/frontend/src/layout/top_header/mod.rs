//! Верхняя панель: меню, выбор склада, пользователь и выход.

use crate::domain::a001_warehouse::ui::selector::WarehouseSelector;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ẩn menu" } else { "Hiện menu" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Quản lý kho"</span>
            </div>

            <div class="top-header__actions">
                <WarehouseSelector />

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.with(|s| {
                            s.user_info
                                .as_ref()
                                .map(|u| u.display_name().to_string())
                                .unwrap_or_else(|| "Khách".to_string())
                        })}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=move |_| do_logout(set_auth_state) title="Đăng xuất">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

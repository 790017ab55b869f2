//! Боковое меню: группы «Chuyển kho» и «Xuất kho»

use crate::layout::global_context::{
    page_label, AppGlobalContext, PAGE_EXPORT_RECEIPTS, PAGE_EXPORT_REQUESTS,
    PAGE_TRANSFERS_INCOMING, PAGE_TRANSFERS_OUTGOING,
};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (page key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "transfers",
            label: "Chuyển kho",
            icon: "shipments",
            items: vec![
                (PAGE_TRANSFERS_OUTGOING, "arrow-up-right"),
                (PAGE_TRANSFERS_INCOMING, "arrow-down-left"),
            ],
        },
        MenuGroup {
            id: "exports",
            label: "Xuất kho",
            icon: "file-text",
            items: vec![
                (PAGE_EXPORT_REQUESTS, "file-text"),
                (PAGE_EXPORT_RECEIPTS, "check-square"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["transfers".to_string(), "exports".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let gid_click = group.id.to_string();
                let gid_chevron = group.id.to_string();
                let gid_show = group.id.to_string();
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |groups| {
                                    if let Some(pos) = groups.iter().position(|x| x == &gid) {
                                        groups.remove(pos);
                                    } else {
                                        groups.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid_show)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.active.get() == key
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_page(key)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{page_label(key)}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

//! Корневая обёртка страницы.
//!
//! Выставляет `id` вида `"{entity}--{category}"` и `data-page-category`,
//! по которым страницы находятся в DOM.

use leptos::prelude::*;

pub const PAGE_CAT_LIST: &str = "list";
pub const PAGE_CAT_SYSTEM: &str = "system";

fn page_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    }
}

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, например `"a002_transfers_outgoing--list"`
    page_id: &'static str,
    category: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class=page_class(category) data-page-category=category>
            {children()}
        </div>
    }
}

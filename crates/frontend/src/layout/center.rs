use crate::shared::notifications::NotificationList;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            <NotificationList />
            {children()}
        </div>
    }
}

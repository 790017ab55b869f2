use crate::shared::icons::icon;
use contracts::shared::status_info::StatusInfo;
use leptos::prelude::*;

/// Бейдж статуса по готовому дескриптору.
///
/// Дескриптор строится одним из резолверов `contracts::shared::status_info`;
/// собственных таблиц цветов у экранов нет.
#[component]
pub fn StatusBadge(info: StatusInfo) -> impl IntoView {
    let class = info.badge_class();
    let style = info.inline_style();
    let title = if info.is_fallback() {
        format!("Trạng thái không xác định: {}", info.label)
    } else {
        info.label.clone()
    };

    view! {
        <span class=class style=style title=title>
            <span class="status-badge__icon">{icon(info.icon)}</span>
            <span class="status-badge__label">{info.label}</span>
        </span>
    }
}

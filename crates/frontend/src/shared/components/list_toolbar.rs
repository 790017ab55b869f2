use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::select::Select;
use crate::shared::icons::icon;
use contracts::shared::list_query::{ListFilter, STATUS_ALL};
use leptos::prelude::*;
use thaw::*;

/// Варианты фильтра статуса: «все» и далее значения словаря с подписями
pub fn status_options(statuses: &[(&str, &str)]) -> Vec<(String, String)> {
    std::iter::once((STATUS_ALL.to_string(), "Tất cả".to_string()))
        .chain(statuses.iter().map(|(v, l)| (v.to_string(), l.to_string())))
        .collect()
}

/// Панель над таблицей: поиск, фильтр статуса и страницы.
///
/// Изменение поиска или статуса сбрасывает страницу на первую
/// (это делают методы `ListFilter`).
#[component]
pub fn ListToolbar(
    filter: RwSignal<ListFilter>,
    #[prop(into)]
    total_pages: Signal<usize>,
    #[prop(into)]
    total_items: Signal<usize>,
    status_options: Vec<(String, String)>,
    #[prop(into)]
    search_placeholder: String,
) -> impl IntoView {
    let search = RwSignal::new(filter.with_untracked(|f| f.search_term.clone()));

    Effect::new(move |_| {
        let term = search.get();
        if filter.with_untracked(|f| f.search_term != term) {
            filter.update(|f| f.set_search_term(term));
        }
    });

    let reset = move |_| {
        search.set(String::new());
        filter.update(|f| {
            f.set_search_term("");
            f.set_status_filter(STATUS_ALL);
        });
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left">
                    {icon("filter")}
                    <span class="filter-panel__title">"Bộ lọc"</span>
                </div>
                <div class="filter-panel-header__center">
                    <PaginationControls
                        current_page=Signal::derive(move || filter.with(|f| f.page))
                        total_pages=total_pages
                        total_count=total_items
                        page_size=Signal::derive(move || filter.with(|f| f.page_size))
                        on_page_change=Callback::new(move |page| filter.update(|f| f.set_page(page)))
                        on_page_size_change=Callback::new(move |size| filter.update(|f| f.set_page_size(size)))
                    />
                </div>
            </div>

            <div class="filter-panel-content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <Input value=search placeholder=search_placeholder />
                    </div>
                    <div style="width: 200px;">
                        <Select
                            value=Signal::derive(move || filter.with(|f| f.status_filter.clone()))
                            on_change=Callback::new(move |status: String| filter.update(|f| f.set_status_filter(status)))
                            options=status_options
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=reset
                        disabled=Signal::derive(move || !filter.with(|f| f.is_active()))
                    >
                        "Xóa lọc"
                    </Button>
                </Flex>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_options_start_with_all() {
        let options = status_options(&[("pending", "Chờ xử lý")]);
        assert_eq!(options[0].0, STATUS_ALL);
        assert_eq!(options[1], ("pending".to_string(), "Chờ xử lý".to_string()));
    }
}

pub mod state;

use self::state::create_state;
use crate::domain::a001_warehouse::store::use_warehouses;
use crate::domain::a003_export_request::workflow::{
    notification_for, perform, ExportRequestAction, ExportRequestGateway,
};
use crate::layout::global_context::{page_label, PAGE_EXPORT_REQUESTS};
use crate::shared::components::list_toolbar::{status_options, ListToolbar};
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::format::format_date;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::request_guard::RequestGeneration;
use crate::system::auth::context::use_api_client;
use contracts::domain::a003_export_request::aggregate::ExportRequest;
use contracts::domain::a003_export_request::status::ExportRequestStatus;
use contracts::domain::a003_export_request::workflow::ExportRequestActions;
use contracts::shared::list_query::{InMemorySource, ListFilter, ListSource};
use contracts::shared::status_info::resolve_export_request_status;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn request_status_options() -> Vec<(String, String)> {
    let labelled: Vec<(&str, String)> = ExportRequestStatus::ALL
        .iter()
        .map(|s| (s.as_str(), resolve_export_request_status(s.as_str()).label))
        .collect();
    let pairs: Vec<(&str, &str)> = labelled.iter().map(|(v, l)| (*v, l.as_str())).collect();
    status_options(&pairs)
}

/// Кнопки строки в порядке отображения
fn row_buttons(actions: ExportRequestActions) -> Vec<(ExportRequestAction, &'static str)> {
    [
        (actions.process, ExportRequestAction::Process, "loader"),
        (actions.approve, ExportRequestAction::Approve, "check"),
        (actions.create_receipt, ExportRequestAction::CreateReceipt, "file-text"),
        (actions.cancel, ExportRequestAction::Cancel, "x-circle"),
    ]
    .into_iter()
    .filter(|(allowed, _, _)| *allowed)
    .map(|(_, action, icon_name)| (action, icon_name))
    .collect()
}

#[component]
pub fn ExportRequestList() -> impl IntoView {
    let warehouses = use_warehouses();
    let api = use_api_client();
    let notifications = use_notifications();

    let state = create_state();
    let filter = RwSignal::new(ListFilter::default());
    let generation = StoredValue::new(RequestGeneration::new());
    let guard = generation.get_value();
    on_cleanup(move || guard.invalidate());

    let load = move || {
        let generation = generation.get_value();
        let ticket = generation.begin();
        let client = api.get_untracked();
        state.update(|s| s.begin_loading());

        spawn_local(async move {
            let result = client.list_requests().await;
            let current = generation.is_current(ticket);
            if current {
                match &result {
                    Ok(items) => log::debug!("loaded {} export requests", items.len()),
                    Err(e) => notifications.error("Không tải được yêu cầu xuất kho", e),
                }
            }
            state.try_update(|s| s.settle(current, Some(result)));
        });
    };

    Effect::new(move |_| untrack(load));

    let run_action = move |request: ExportRequest, action: ExportRequestAction| {
        let generation = generation.get_value();
        let ticket = generation.begin();
        let client = api.get_untracked();

        spawn_local(async move {
            let outcome = perform(&client, &request, action).await;
            let (kind, message) = notification_for(action, &request.request_code, &outcome.result);
            notifications.push(kind, message);

            let current = generation.is_current(ticket);
            state.try_update(|s| s.settle(current, outcome.reloaded));
        });
    };

    let page = Memo::new(move |_| {
        state.with(|s| InMemorySource::new(s.requests.clone()).page(&filter.get()))
    });

    Effect::new(move |_| {
        let total = page.with(|p| p.total_pages);
        if filter.with_untracked(|f| f.page > total) {
            filter.update(|f| f.clamp_page(total));
        }
    });

    view! {
        <PageFrame page_id="a003_export_request--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("file-text")}
                    <h1 class="page__title">{page_label(PAGE_EXPORT_REQUESTS)}</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || page.with(|p| p.total_items).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || state.with(|s| s.loading))
                    >
                        {icon("refresh")}
                        " Làm mới"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ListToolbar
                    filter=filter
                    total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                    total_items=Signal::derive(move || page.with(|p| p.total_items))
                    status_options=request_status_options()
                    search_placeholder="Mã yêu cầu, đại lý, ghi chú..."
                />

                {move || state.with(|s| s.error.clone()).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 960px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=120.0>"Mã yêu cầu"</TableHeaderCell>
                                <TableHeaderCell min_width=180.0>"Đại lý"</TableHeaderCell>
                                <TableHeaderCell min_width=160.0>"Kho"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Ngày yêu cầu"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Số dòng"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Trạng thái"</TableHeaderCell>
                                <TableHeaderCell min_width=260.0>"Thao tác"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page.with(|p| p.page_items.clone())
                                key=|r| (r.to_string_id(), r.status.clone())
                                children=move |request| {
                                    let warehouse = warehouses.lookup().name_for(request.warehouse_id);
                                    let buttons = row_buttons(ExportRequestActions::for_status(&request.status));
                                    let code = request.request_code.clone();
                                    let agency = request.agency_name.clone();
                                    let date = format_date(&request.request_date);
                                    let line_count = request.lines.len();
                                    let badge = resolve_export_request_status(&request.status);
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{agency}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{warehouse}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{date}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{line_count}</TableCellLayout></TableCell>
                                            <TableCell><StatusBadge info=badge /></TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    {buttons
                                                        .into_iter()
                                                        .map(|(action, icon_name)| {
                                                            let request = request.clone();
                                                            let appearance = match action {
                                                                ExportRequestAction::Cancel => ButtonAppearance::Subtle,
                                                                ExportRequestAction::CreateReceipt => ButtonAppearance::Primary,
                                                                _ => ButtonAppearance::Secondary,
                                                            };
                                                            view! {
                                                                <Button
                                                                    size=ButtonSize::Small
                                                                    appearance=appearance
                                                                    on_click=move |_| run_action(request.clone(), action)
                                                                >
                                                                    {icon(icon_name)}
                                                                    {format!(" {}", action.label())}
                                                                </Button>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || state.with(|s| s.is_loaded) && page.with(|p| p.is_empty())>
                    <div class="empty-state">"Không có yêu cầu xuất kho"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_follow_status() {
        let approved = row_buttons(ExportRequestActions::for_status("approved"));
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].0, ExportRequestAction::CreateReceipt);

        let requested: Vec<ExportRequestAction> =
            row_buttons(ExportRequestActions::for_status("Requested"))
                .into_iter()
                .map(|(a, _)| a)
                .collect();
        assert_eq!(
            requested,
            vec![
                ExportRequestAction::Process,
                ExportRequestAction::Approve,
                ExportRequestAction::Cancel
            ]
        );

        assert!(row_buttons(ExportRequestActions::for_status("cancelled")).is_empty());
    }

    #[test]
    fn test_status_filter_uses_request_vocabulary() {
        let values: Vec<String> = request_status_options().into_iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec!["all", "requested", "processing", "approved", "cancelled"]);
    }
}

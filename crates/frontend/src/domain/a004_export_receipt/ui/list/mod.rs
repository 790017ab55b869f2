pub mod state;

use self::state::create_state;
use super::details::{line_progress, LineApprovalDialog, ReceiptDetails};
use crate::domain::a001_warehouse::store::use_warehouses;
use crate::domain::a004_export_receipt::workflow::{
    notification_for, submit_line_approval, LineApproval, ReceiptGateway,
};
use crate::layout::global_context::{page_label, PAGE_EXPORT_RECEIPTS};
use crate::shared::components::list_toolbar::{status_options, ListToolbar};
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::dialog::DialogState;
use crate::shared::format::format_datetime;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::request_guard::RequestGeneration;
use crate::system::auth::context::use_api_client;
use contracts::domain::a002_warehouse_transfer::status::TransferStatus;
use contracts::shared::list_query::{InMemorySource, ListFilter, ListSource};
use contracts::shared::status_info::resolve_status;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Документ бывает только в ожидании или завершён
fn receipt_status_options() -> Vec<(String, String)> {
    let labelled: Vec<(&str, String)> = [TransferStatus::Pending, TransferStatus::Completed]
        .iter()
        .map(|s| (s.as_str(), resolve_status(s.as_str()).label))
        .collect();
    let pairs: Vec<(&str, &str)> = labelled.iter().map(|(v, l)| (*v, l.as_str())).collect();
    status_options(&pairs)
}

#[component]
pub fn ExportReceiptList() -> impl IntoView {
    let warehouses = use_warehouses();
    let api = use_api_client();
    let notifications = use_notifications();

    let state = create_state();
    let filter = RwSignal::new(ListFilter::default());
    let open_receipt = RwSignal::new(None::<String>);
    let open_line = RwSignal::new(None::<LineApproval>);
    let dialog = RwSignal::new(DialogState::default());

    let generation = StoredValue::new(RequestGeneration::new());
    let guard = generation.get_value();
    on_cleanup(move || guard.invalidate());

    let load = move || {
        let generation = generation.get_value();
        let ticket = generation.begin();
        let client = api.get_untracked();
        state.update(|s| s.begin_loading());

        spawn_local(async move {
            let result = client.list_receipts().await;
            let current = generation.is_current(ticket);
            if current {
                match &result {
                    Ok(items) => log::debug!("loaded {} export receipts", items.len()),
                    Err(e) => notifications.error("Không tải được phiếu xuất kho", e),
                }
            }
            state.try_update(|s| s.settle(current, Some(result)));
        });
    };

    Effect::new(move |_| untrack(load));

    let submit_line = Callback::new(move |approval: LineApproval| {
        if !dialog.try_update(|d| d.begin_submit()).unwrap_or(false) {
            return;
        }
        let receipt_code = open_receipt
            .get_untracked()
            .and_then(|id| state.with_untracked(|s| s.find(&id).map(|r| r.receipt_code.clone())))
            .unwrap_or_default();
        let generation = generation.get_value();
        let ticket = generation.begin();
        let client = api.get_untracked();

        spawn_local(async move {
            let outcome = submit_line_approval(&client, &approval).await;
            let (kind, message) = notification_for(&receipt_code, &outcome.result);
            notifications.push(kind, message);

            let current = generation.is_current(ticket);
            if current {
                dialog.update(|d| d.finish(&outcome.result));
                if outcome.result.is_ok() {
                    open_line.set(None);
                }
            }
            state.try_update(|s| s.settle(current, outcome.reloaded));
        });
    });

    let pick_line = Callback::new(move |approval: LineApproval| {
        dialog.set(DialogState::opened());
        open_line.set(Some(approval));
    });

    let close_line = Callback::new(move |_: ()| {
        if dialog.with_untracked(|d| d.submitting) {
            return;
        }
        dialog.update(|d| d.close());
        open_line.set(None);
    });

    let close_receipt = Callback::new(move |_: ()| {
        if open_line.with_untracked(|l| l.is_some()) {
            return;
        }
        open_receipt.set(None);
    });

    let page = Memo::new(move |_| {
        state.with(|s| InMemorySource::new(s.receipts.clone()).page(&filter.get()))
    });

    Effect::new(move |_| {
        let total = page.with(|p| p.total_pages);
        if filter.with_untracked(|f| f.page > total) {
            filter.update(|f| f.clamp_page(total));
        }
    });

    // карточка следит за коллекцией: после перезагрузки строки обновляются
    let render_receipt = move || {
        let id = open_receipt.get()?;
        let receipt = state.with(|s| s.find(&id).cloned())?;
        let warehouse_name = warehouses.lookup().name_for(receipt.warehouse_id);
        Some(view! {
            <ReceiptDetails
                receipt=receipt
                warehouse_name=warehouse_name
                on_pick_line=pick_line
                on_close=close_receipt
            />
        })
    };

    let render_line = move || {
        let approval = open_line.get()?;
        Some(view! {
            <LineApprovalDialog
                approval=approval
                dialog=dialog
                on_submit=submit_line
                on_close=close_line
            />
        })
    };

    view! {
        <PageFrame page_id="a004_export_receipt--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("check-square")}
                    <h1 class="page__title">{page_label(PAGE_EXPORT_RECEIPTS)}</h1>
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
                    status_options=receipt_status_options()
                    search_placeholder="Mã phiếu, mã yêu cầu, ghi chú..."
                />

                {move || state.with(|s| s.error.clone()).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 860px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=120.0>"Mã phiếu"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Mã yêu cầu"</TableHeaderCell>
                                <TableHeaderCell min_width=160.0>"Kho"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Ngày tạo"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Đã duyệt"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Trạng thái"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page.with(|p| p.page_items.clone())
                                key=|r| (r.to_string_id(), r.metadata.version)
                                children=move |receipt| {
                                    let id = receipt.to_string_id();
                                    let warehouse = warehouses.lookup().name_for(receipt.warehouse_id);
                                    let receipt_code = receipt.receipt_code.clone();
                                    let request_code = receipt.request_code.clone();
                                    let created_at = format_datetime(&receipt.created_at);
                                    let progress = line_progress(&receipt);
                                    let badge = resolve_status(&receipt.status);
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{receipt_code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{request_code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{warehouse}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{created_at}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{progress}</TableCellLayout></TableCell>
                                            <TableCell><StatusBadge info=badge /></TableCell>
                                            <TableCell>
                                                <Button
                                                    size=ButtonSize::Small
                                                    on_click=move |_| open_receipt.set(Some(id.clone()))
                                                >
                                                    {icon("eye")}
                                                    " Xem"
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || state.with(|s| s.is_loaded) && page.with(|p| p.is_empty())>
                    <div class="empty-state">"Chưa có phiếu xuất kho"</div>
                </Show>
            </div>

            {render_receipt}
            {render_line}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_status_options() {
        let values: Vec<String> = receipt_status_options().into_iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec!["all", "pending", "completed"]);
    }
}

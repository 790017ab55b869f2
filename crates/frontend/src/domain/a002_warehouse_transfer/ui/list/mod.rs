pub mod state;

use self::state::create_state;
use super::details::TransferDetails;
use super::planning::PlanningDialog;
use crate::domain::a001_warehouse::store::use_warehouses;
use crate::domain::a002_warehouse_transfer::workflow::{
    notification_for, perform, reload, TransferAction,
};
use crate::layout::global_context::{
    page_label, AppGlobalContext, PAGE_TRANSFERS_INCOMING, PAGE_TRANSFERS_OUTGOING,
};
use crate::shared::components::list_toolbar::{status_options, ListToolbar};
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::dialog::DialogState;
use crate::shared::format::format_date;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::request_guard::RequestGeneration;
use crate::system::auth::context::use_api_client;
use contracts::domain::a002_warehouse_transfer::aggregate::{TransferListQuery, WarehouseTransfer};
use contracts::domain::a002_warehouse_transfer::row::TransferRow;
use contracts::domain::a002_warehouse_transfer::status::{TransferDirection, TransferStatus};
use contracts::domain::a002_warehouse_transfer::workflow::TransferActions;
use contracts::shared::list_query::{InMemorySource, ListFilter, ListSource};
use contracts::shared::status_info::resolve_status;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Какой диалог открыт и для какого перемещения (по id)
#[derive(Debug, Clone, PartialEq)]
enum OpenDialog {
    Details(String),
    Planning(String),
}

fn page_key(direction: TransferDirection) -> &'static str {
    match direction {
        TransferDirection::Outgoing => PAGE_TRANSFERS_OUTGOING,
        TransferDirection::Incoming => PAGE_TRANSFERS_INCOMING,
    }
}

fn page_id(direction: TransferDirection) -> &'static str {
    match direction {
        TransferDirection::Outgoing => "a002_transfers_outgoing--list",
        TransferDirection::Incoming => "a002_transfers_incoming--list",
    }
}

fn counterpart_header(direction: TransferDirection) -> &'static str {
    match direction {
        TransferDirection::Outgoing => "Kho nhận",
        TransferDirection::Incoming => "Kho xuất",
    }
}

fn transfer_status_options() -> Vec<(String, String)> {
    let labelled: Vec<(&str, String)> = TransferStatus::ALL
        .iter()
        .map(|s| (s.as_str(), resolve_status(s.as_str()).label))
        .collect();
    let pairs: Vec<(&str, &str)> = labelled.iter().map(|(v, l)| (*v, l.as_str())).collect();
    status_options(&pairs)
}

/// Список перемещений выбранного склада в одном направлении.
///
/// Страница владеет коллекцией: диалоги получают копию записи, а после
/// любой успешной мутации коллекция загружается заново.
#[component]
pub fn TransferList(direction: TransferDirection) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext not found");
    let warehouses = use_warehouses();
    let api = use_api_client();
    let notifications = use_notifications();

    let state = create_state();
    let filter = RwSignal::new(ListFilter::default());
    let open = RwSignal::new(None::<OpenDialog>);
    let dialog = RwSignal::new(DialogState::default());

    let generation = StoredValue::new(RequestGeneration::new());
    let guard = generation.get_value();
    on_cleanup(move || guard.invalidate());

    let current_query = move || {
        ctx.warehouse_id
            .get_untracked()
            .map(|warehouse_id| TransferListQuery {
                warehouse_id,
                direction,
            })
    };

    let load = move || {
        let Some(query) = current_query() else {
            state.update(|s| s.clear());
            return;
        };
        let generation = generation.get_value();
        let ticket = generation.begin();
        let client = api.get_untracked();
        state.update(|s| s.begin_loading());

        spawn_local(async move {
            let result = reload(&client, &query).await;
            let current = generation.is_current(ticket);
            if !current {
                log::debug!("drop stale transfer list for warehouse {}", query.warehouse_id);
            } else {
                match &result {
                    Ok(items) => log::debug!(
                        "loaded {} {} transfers for warehouse {}",
                        items.len(),
                        direction.as_str(),
                        query.warehouse_id
                    ),
                    Err(e) => notifications.error("Không tải được danh sách chuyển kho", e),
                }
            }
            state.try_update(|s| s.settle(current, Some(result)));
        });
    };

    // смена склада: старая коллекция не показывается ни мгновения
    Effect::new(move |_| {
        let _ = ctx.warehouse_id.get();
        untrack(|| {
            open.set(None);
            state.update(|s| s.clear());
            load();
        });
    });

    let run_action = move |transfer: WarehouseTransfer, action: TransferAction, in_dialog: bool| {
        let Some(query) = current_query() else {
            return;
        };
        if in_dialog && !dialog.try_update(|d| d.begin_submit()).unwrap_or(false) {
            return;
        }
        let generation = generation.get_value();
        let ticket = generation.begin();
        let client = api.get_untracked();

        spawn_local(async move {
            let outcome = perform(&client, &query, &transfer, action).await;
            let (kind, message) = notification_for(action, &transfer.request_code, &outcome.result);
            notifications.push(kind, message);

            let current = generation.is_current(ticket);
            if current && in_dialog {
                dialog.update(|d| d.finish(&outcome.result));
                if outcome.result.is_ok() {
                    open.set(None);
                }
            }
            state.try_update(|s| s.settle(current, outcome.reloaded));
        });
    };

    let rows = Memo::new(move |_| {
        let lookup = warehouses.lookup();
        state.with(|s| TransferRow::build_all(s.transfers.clone(), direction, &lookup))
    });
    let page = Memo::new(move |_| InMemorySource::new(rows.get()).page(&filter.get()));

    // после перезагрузки страниц может стать меньше
    Effect::new(move |_| {
        let total = page.with(|p| p.total_pages);
        if filter.with_untracked(|f| f.page > total) {
            filter.update(|f| f.clamp_page(total));
        }
    });

    let open_dialog = move |which: OpenDialog| {
        dialog.set(DialogState::opened());
        open.set(Some(which));
    };

    let close_dialog = Callback::new(move |_: ()| {
        if dialog.with_untracked(|d| d.submitting) {
            return;
        }
        dialog.update(|d| d.close());
        open.set(None);
    });

    let dialog_transfer = move |id: &str| state.with_untracked(|s| s.find(id).cloned());

    let render_dialog = move || {
        let which = open.get()?;
        match which {
            OpenDialog::Details(id) => {
                let transfer = dialog_transfer(&id)?;
                let for_approve = transfer.clone();
                let on_approve = Callback::new(move |_: ()| {
                    run_action(for_approve.clone(), TransferAction::Approve, true)
                });
                Some(
                    view! {
                        <TransferDetails
                            transfer=transfer
                            direction=direction
                            lookup=warehouses.lookup()
                            dialog=dialog
                            on_approve=on_approve
                            on_close=close_dialog
                        />
                    }
                    .into_any(),
                )
            }
            OpenDialog::Planning(id) => {
                let transfer = dialog_transfer(&id)?;
                let for_plan = transfer.clone();
                let on_submit = Callback::new(move |selected: Option<i64>| {
                    run_action(for_plan.clone(), TransferAction::Plan { selected }, true)
                });
                Some(
                    view! {
                        <PlanningDialog
                            transfer=transfer
                            warehouses=warehouses.items.get_untracked()
                            dialog=dialog
                            on_submit=on_submit
                            on_close=close_dialog
                        />
                    }
                    .into_any(),
                )
            }
        }
    };

    view! {
        <PageFrame page_id=page_id(direction) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon(match direction {
                        TransferDirection::Outgoing => "arrow-up-right",
                        TransferDirection::Incoming => "arrow-down-left",
                    })}
                    <h1 class="page__title">{page_label(page_key(direction))}</h1>
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
                        {move || if state.with(|s| s.loading) { " Đang tải..." } else { " Làm mới" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ListToolbar
                    filter=filter
                    total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                    total_items=Signal::derive(move || page.with(|p| p.total_items))
                    status_options=transfer_status_options()
                    search_placeholder="Mã yêu cầu, kho, ghi chú..."
                />

                {move || state.with(|s| s.error.clone()).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <Show
                    when=move || ctx.warehouse_id.get().is_some()
                    fallback=|| view! { <div class="empty-state">"Vui lòng chọn kho"</div> }
                >
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%; min-width: 900px;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell min_width=120.0>"Mã yêu cầu"</TableHeaderCell>
                                    <TableHeaderCell min_width=180.0>{counterpart_header(direction)}</TableHeaderCell>
                                    <TableHeaderCell min_width=110.0>"Ngày yêu cầu"</TableHeaderCell>
                                    <TableHeaderCell min_width=80.0>"Số SP"</TableHeaderCell>
                                    <TableHeaderCell min_width=140.0>"Trạng thái"</TableHeaderCell>
                                    <TableHeaderCell min_width=220.0>"Thao tác"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || page.with(|p| p.page_items.clone())
                                    key=|row| (row.transfer.to_string_id(), row.transfer.status.clone())
                                    children=move |row| {
                                        let TransferRow { transfer, counterpart_name } = row;
                                        let id = transfer.to_string_id();
                                        let code = transfer.request_code.clone();
                                        let request_date = format_date(&transfer.request_date);
                                        let product_count = transfer.product_count();
                                        let badge = resolve_status(&transfer.status);
                                        let actions = TransferActions::for_view(&transfer.status, direction);
                                        let (view_id, plan_id) = (id.clone(), id);
                                        let (for_cancel, for_complete) = (transfer.clone(), transfer);
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <a
                                                            href="#"
                                                            class="table__link"
                                                            on:click=move |ev| {
                                                                ev.prevent_default();
                                                                open_dialog(OpenDialog::Details(view_id.clone()));
                                                            }
                                                        >
                                                            {code}
                                                        </a>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{counterpart_name}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{request_date}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{product_count}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <StatusBadge info=badge />
                                                </TableCell>
                                                <TableCell>
                                                    <Flex gap=FlexGap::Small>
                                                        <Show when=move || actions.plan>
                                                            <Button
                                                                size=ButtonSize::Small
                                                                on_click={
                                                                    let plan_id = plan_id.clone();
                                                                    move |_| open_dialog(OpenDialog::Planning(plan_id.clone()))
                                                                }
                                                            >
                                                                {icon("calendar")}
                                                                " Lên kế hoạch"
                                                            </Button>
                                                        </Show>
                                                        <Show when=move || actions.complete>
                                                            <Button
                                                                size=ButtonSize::Small
                                                                appearance=ButtonAppearance::Primary
                                                                on_click={
                                                                    let t = for_complete.clone();
                                                                    move |_| run_action(t.clone(), TransferAction::Complete, false)
                                                                }
                                                            >
                                                                {icon("check-circle")}
                                                                " Hoàn thành"
                                                            </Button>
                                                        </Show>
                                                        <Show when=move || actions.cancel>
                                                            <Button
                                                                size=ButtonSize::Small
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click={
                                                                    let t = for_cancel.clone();
                                                                    move |_| run_action(t.clone(), TransferAction::Cancel, false)
                                                                }
                                                            >
                                                                {icon("x-circle")}
                                                                " Hủy"
                                                            </Button>
                                                        </Show>
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
                        <div class="empty-state">
                            {move || if filter.with(|f| f.is_active()) {
                                "Không có yêu cầu phù hợp bộ lọc"
                            } else {
                                "Chưa có yêu cầu chuyển kho"
                            }}
                        </div>
                    </Show>
                </Show>
            </div>

            {render_dialog}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_lists_transfer_vocabulary() {
        let options = transfer_status_options();
        let values: Vec<&str> = options.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(
            values,
            vec!["all", "pending", "planned", "approved", "completed", "cancelled"]
        );
        assert!(options.iter().all(|(_, label)| !label.is_empty()));
    }

    #[test]
    fn test_page_keys_follow_direction() {
        assert_eq!(page_key(TransferDirection::Outgoing), PAGE_TRANSFERS_OUTGOING);
        assert!(page_id(TransferDirection::Incoming).starts_with(PAGE_TRANSFERS_INCOMING));
    }
}

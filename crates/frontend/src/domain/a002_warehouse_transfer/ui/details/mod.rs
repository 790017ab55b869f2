use crate::shared::dialog::DialogState;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::format::{format_date, format_quantity};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::domain::a001_warehouse::lookup::WarehouseLookup;
use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use contracts::domain::a002_warehouse_transfer::status::TransferDirection;
use contracts::domain::a002_warehouse_transfer::workflow::TransferActions;
use contracts::shared::status_info::resolve_status;
use leptos::prelude::*;
use thaw::*;

/// Строка таблицы товаров в карточке
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLineView {
    pub key: String,
    pub name: String,
    pub code: String,
    pub quantity: String,
    pub unit: String,
    pub notes: String,
}

/// Строки товаров; без снимка карточки код пустой, имя `#id`
pub fn product_lines(transfer: &WarehouseTransfer) -> Vec<ProductLineView> {
    transfer
        .products
        .iter()
        .enumerate()
        .map(|(i, p)| ProductLineView {
            key: format!("{}-{}", i, p.product_id),
            name: p.display_name(),
            code: p
                .product_details
                .as_ref()
                .map(|d| d.code.clone())
                .unwrap_or_default(),
            quantity: format_quantity(p.quantity),
            unit: p.unit.clone(),
            notes: p.notes.clone().unwrap_or_default(),
        })
        .collect()
}

/// Кнопка утверждения: только у склада-получателя и только в допустимом статусе
pub fn approve_offered(transfer: &WarehouseTransfer, direction: TransferDirection) -> bool {
    TransferActions::for_view(&transfer.status, direction).approve
}

/// Карточка перемещения с кнопкой утверждения.
///
/// Данные только для чтения: утверждение выполняет владелец списка через
/// `on_approve` и сам же перезагружает коллекцию.
#[component]
pub fn TransferDetails(
    transfer: WarehouseTransfer,
    direction: TransferDirection,
    lookup: WarehouseLookup,
    dialog: RwSignal<DialogState>,
    on_approve: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = format!("Chi tiết yêu cầu {}", transfer.request_code);
    let approvable = approve_offered(&transfer, direction);
    let lines = product_lines(&transfer);
    let has_lines = !lines.is_empty();
    let lines = StoredValue::new(lines);

    let code = transfer.request_code.clone();
    let source = lookup.name_for(transfer.source_warehouse_id);
    let destination = lookup.name_for(transfer.destination_warehouse_id);
    let fulfilling = transfer
        .fulfilling_warehouse_id
        .map(|id| lookup.name_for(id))
        .unwrap_or_else(|| "Chưa lên kế hoạch".to_string());
    let request_date = format_date(&transfer.request_date);
    let badge = resolve_status(&transfer.status);
    let notes = transfer.notes.clone().unwrap_or_default();
    let products_title = format!(
        "Sản phẩm ({}) · tổng {}",
        transfer.product_count(),
        format_quantity(transfer.total_quantity())
    );
    let submitting = Signal::derive(move || dialog.with(|d| d.submitting));

    let footer = move || {
        view! {
            <Flex gap=FlexGap::Small justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Đóng"
                </Button>
                <Show when=move || approvable>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_approve.run(())
                        disabled=submitting
                    >
                        {move || if submitting.get() {
                            view! { <Spinner size=SpinnerSize::Tiny /> }.into_any()
                        } else {
                            icon("check")
                        }}
                        " Duyệt"
                    </Button>
                </Show>
            </Flex>
        }
    };

    view! {
        <Modal title=title on_close=on_close footer=ChildrenFn::to_children(footer)>
            {move || dialog.with(|d| d.error.clone()).map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}

            <div class="details-grid">
                <div class="details-grid__label">"Mã yêu cầu"</div>
                <div>{code}</div>
                <div class="details-grid__label">"Kho xuất"</div>
                <div>{source}</div>
                <div class="details-grid__label">"Kho nhận"</div>
                <div>{destination}</div>
                <div class="details-grid__label">"Kho thực hiện"</div>
                <div>{fulfilling}</div>
                <div class="details-grid__label">"Ngày yêu cầu"</div>
                <div>{request_date}</div>
                <div class="details-grid__label">"Trạng thái"</div>
                <div><StatusBadge info=badge /></div>
                <div class="details-grid__label">"Ghi chú"</div>
                <div>{notes}</div>
            </div>

            <h3 class="modal-section__title">{products_title}</h3>

            <Show
                when=move || has_lines
                fallback=|| view! { <div class="empty-state">"Không có sản phẩm"</div> }
            >
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Mã"</TableHeaderCell>
                            <TableHeaderCell>"Sản phẩm"</TableHeaderCell>
                            <TableHeaderCell>"Số lượng"</TableHeaderCell>
                            <TableHeaderCell>"Đơn vị"</TableHeaderCell>
                            <TableHeaderCell>"Ghi chú"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || lines.get_value()
                            key=|line| line.key.clone()
                            children=|line| {
                                let ProductLineView { code, name, quantity, unit, notes, .. } = line;
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{code}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{quantity}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{unit}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{notes}</TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </Show>
        </Modal>
    }
}

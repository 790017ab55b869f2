use crate::domain::a004_export_receipt::workflow::LineApproval;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::dialog::DialogState;
use crate::shared::format::{format_datetime, format_quantity};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::domain::a004_export_receipt::aggregate::{ExportReceipt, ReceiptLine};
use contracts::shared::status_info::resolve_status;
use leptos::prelude::*;
use thaw::*;

/// «утверждено / всего» для заголовка и списка
pub fn line_progress(receipt: &ExportReceipt) -> String {
    format!("{}/{}", receipt.approved_count(), receipt.lines.len())
}

fn approved_text(line: &ReceiptLine) -> String {
    line.approved_quantity
        .map(format_quantity)
        .unwrap_or_else(|| "-".to_string())
}

/// Карточка документа; у строк в ожидании есть кнопка утверждения
#[component]
pub fn ReceiptDetails(
    receipt: ExportReceipt,
    warehouse_name: String,
    on_pick_line: Callback<LineApproval>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = format!("Phiếu xuất {}", receipt.receipt_code);
    let progress = line_progress(&receipt);
    let receipt_code = receipt.receipt_code.clone();
    let request_code = receipt.request_code.clone();
    let created_at = format_datetime(&receipt.created_at);
    let badge = resolve_status(&receipt.status);
    let lines = receipt.lines;

    let footer = move || {
        view! {
            <Flex justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Đóng"
                </Button>
            </Flex>
        }
    };

    view! {
        <Modal title=title on_close=on_close footer=ChildrenFn::to_children(footer)>
            <div class="details-grid">
                <div class="details-grid__label">"Mã phiếu"</div>
                <div>{receipt_code}</div>
                <div class="details-grid__label">"Yêu cầu"</div>
                <div>{request_code}</div>
                <div class="details-grid__label">"Kho"</div>
                <div>{warehouse_name}</div>
                <div class="details-grid__label">"Ngày tạo"</div>
                <div>{created_at}</div>
                <div class="details-grid__label">"Trạng thái"</div>
                <div><StatusBadge info=badge /></div>
                <div class="details-grid__label">"Đã duyệt"</div>
                <div>{progress}</div>
            </div>

            {if lines.is_empty() {
                view! { <div class="empty-state">"Phiếu không có dòng hàng"</div> }.into_any()
            } else {
                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Sản phẩm"</TableHeaderCell>
                                <TableHeaderCell>"Đơn vị"</TableHeaderCell>
                                <TableHeaderCell>"SL yêu cầu"</TableHeaderCell>
                                <TableHeaderCell>"SL duyệt"</TableHeaderCell>
                                <TableHeaderCell>"Trạng thái"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {lines
                                .into_iter()
                                .map(|line| {
                                    let pending = line.is_pending();
                                    let approval = LineApproval::for_line(&line);
                                    let product = format!("#{}", line.product_id);
                                    let requested = format_quantity(line.requested_quantity);
                                    let approved = approved_text(&line);
                                    let badge = resolve_status(&line.status);
                                    let unit = line.unit;
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{product}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{unit}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{requested}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{approved}</TableCellLayout></TableCell>
                                            <TableCell><StatusBadge info=badge /></TableCell>
                                            <TableCell>
                                                <Show when=move || pending>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Primary
                                                        on_click={
                                                            let approval = approval.clone();
                                                            move |_| on_pick_line.run(approval.clone())
                                                        }
                                                    >
                                                        {icon("check")}
                                                        " Duyệt"
                                                    </Button>
                                                </Show>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }}
        </Modal>
    }
}

/// Диалог количества для одной строки.
///
/// Предупреждение о превышении показывается сразу при вводе; на сервер
/// уходит уже приведённое значение.
#[component]
pub fn LineApprovalDialog(
    approval: LineApproval,
    dialog: RwSignal<DialogState>,
    on_submit: Callback<LineApproval>,
    on_close: Callback<()>,
) -> impl IntoView {
    let requested = approval.requested;
    let line_id = approval.line_id.clone();
    let raw = RwSignal::new(approval.raw.clone());
    let current = Memo::new(move |_| LineApproval {
        line_id: line_id.clone(),
        requested,
        raw: raw.get(),
    });
    let check = Memo::new(move |_| current.with(|a| a.check()));
    let submitting = Signal::derive(move || dialog.with(|d| d.submitting));

    let footer = move || {
        view! {
            <Flex gap=FlexGap::Small justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Hủy bỏ"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_submit.run(current.get_untracked())
                    disabled=submitting
                >
                    {move || submitting.get().then(|| view! { <Spinner size=SpinnerSize::Tiny /> })}
                    " Duyệt"
                </Button>
            </Flex>
        }
    };

    view! {
        <Modal title="Duyệt dòng hàng".to_string() on_close=on_close footer=ChildrenFn::to_children(footer)>
            {move || dialog.with(|d| d.error.clone()).map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}
            <div class="form__group">
                <label class="form__label">
                    {format!("Số lượng duyệt (yêu cầu {})", format_quantity(requested))}
                </label>
                <Input value=raw disabled=submitting />
            </div>
            {move || match check.get() {
                None => Some(view! {
                    <div class="alert alert--warning">"Vui lòng nhập số lượng"</div>
                }.into_any()),
                Some(c) => c.warning.map(|w| view! {
                    <div class="alert alert--warning">{icon("alert-triangle")}" "{w}</div>
                }.into_any()),
            }}
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_export_request::aggregate::{
        CreateExportRequestDto, ExportRequest, ExportRequestLine,
    };

    #[test]
    fn test_line_progress() {
        let request = ExportRequest::new_for_insert(CreateExportRequestDto {
            agency_name: "Đại lý An Phú".into(),
            warehouse_id: 1,
            lines: vec![
                ExportRequestLine {
                    product_id: 1,
                    quantity: 5.0,
                    unit: "hộp".into(),
                },
                ExportRequestLine {
                    product_id: 2,
                    quantity: 8.0,
                    unit: "hộp".into(),
                },
            ],
            ..Default::default()
        });
        let mut receipt = ExportReceipt::from_request(&request);
        assert_eq!(line_progress(&receipt), "0/2");
        assert_eq!(approved_text(&receipt.lines[0]), "-");

        let id = receipt.lines[0].id;
        receipt.approve_line(id, Some(4.0)).unwrap();
        assert_eq!(line_progress(&receipt), "1/2");
        assert_eq!(approved_text(&receipt.lines[0]), "4");
    }
}

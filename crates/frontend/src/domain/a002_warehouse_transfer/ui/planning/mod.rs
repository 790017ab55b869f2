use crate::domain::a001_warehouse::store::warehouse_options;
use crate::domain::a002_warehouse_transfer::workflow::parse_selection;
use crate::shared::dialog::DialogState;
use crate::shared::components::select::Select;
use crate::shared::modal::Modal;
use contracts::domain::a001_warehouse::aggregate::Warehouse;
use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use leptos::prelude::*;
use thaw::*;

/// Склады, которые могут исполнить перемещение: все, кроме склада-получателя
pub fn planning_candidates(warehouses: &[Warehouse], transfer: &WarehouseTransfer) -> Vec<(String, String)> {
    let eligible: Vec<Warehouse> = warehouses
        .iter()
        .filter(|w| w.id != transfer.destination_warehouse_id)
        .cloned()
        .collect();
    warehouse_options(&eligible)
}

/// Диалог планирования: выбор склада-исполнителя.
///
/// При повторном планировании предвыбран текущий склад-исполнитель.
#[component]
pub fn PlanningDialog(
    transfer: WarehouseTransfer,
    warehouses: Vec<Warehouse>,
    dialog: RwSignal<DialogState>,
    on_submit: Callback<Option<i64>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = format!("Lên kế hoạch {}", transfer.request_code);
    let options = planning_candidates(&warehouses, &transfer);
    let selected = RwSignal::new(
        transfer
            .fulfilling_warehouse_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
    );
    let submitting = Signal::derive(move || dialog.with(|d| d.submitting));

    let footer = move || {
        view! {
            <Flex gap=FlexGap::Small justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Hủy bỏ"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_submit.run(parse_selection(&selected.get_untracked()))
                    disabled=submitting
                >
                    {move || submitting.get().then(|| view! { <Spinner size=SpinnerSize::Tiny /> })}
                    " Xác nhận"
                </Button>
            </Flex>
        }
    };

    view! {
        <Modal title=title on_close=on_close footer=ChildrenFn::to_children(footer)>
            {move || dialog.with(|d| d.error.clone()).map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}
            <Select
                label="Kho thực hiện".to_string()
                value=selected
                on_change=Callback::new(move |v: String| selected.set(v))
                options=options
                placeholder="— Chọn kho —".to_string()
                disabled=submitting
            />
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_warehouse_transfer::aggregate::CreateTransferDto;

    fn warehouse(id: i64, code: &str) -> Warehouse {
        Warehouse {
            id,
            code: code.into(),
            name: format!("Kho {}", code),
            address: None,
        }
    }

    #[test]
    fn test_destination_is_not_a_candidate() {
        let transfer = WarehouseTransfer::new_for_insert(CreateTransferDto {
            request_code: Some("TR-1".into()),
            source_warehouse_id: 1,
            destination_warehouse_id: 2,
            ..Default::default()
        });
        let candidates = planning_candidates(
            &[warehouse(1, "HN"), warehouse(2, "DN"), warehouse(3, "HCM")],
            &transfer,
        );
        let ids: Vec<&str> = candidates.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}

//! Действия над перемещениями: планирование, утверждение, отмена, завершение.
//!
//! Контракт один для всех действий: после успешной мутации владелец списка
//! перезагружает коллекцию, локально статус не патчится. При ошибке локальное
//! состояние не меняется, диалог остаётся открытым.

use async_trait::async_trait;
use contracts::domain::a002_warehouse_transfer::aggregate::{
    PlanningRequest, TransferListQuery, WarehouseTransfer,
};
use contracts::domain::a002_warehouse_transfer::workflow;

use crate::shared::notifications::NotificationKind;
use crate::shared::operation_error::OperationError;

/// Сервер перемещений. В браузере это [`ApiClient`](crate::shared::api_client::ApiClient).
#[async_trait(?Send)]
pub trait TransferGateway {
    async fn list_transfers(
        &self,
        query: &TransferListQuery,
    ) -> Result<Vec<WarehouseTransfer>, OperationError>;

    async fn plan_transfer(
        &self,
        transfer_id: &str,
        request: &PlanningRequest,
    ) -> Result<(), OperationError>;

    async fn approve_transfer(&self, transfer_id: &str) -> Result<(), OperationError>;

    async fn cancel_transfer(&self, transfer_id: &str) -> Result<(), OperationError>;

    async fn complete_transfer(&self, transfer_id: &str) -> Result<(), OperationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    /// Назначить склад-исполнитель; `None` - склад не выбран
    Plan { selected: Option<i64> },
    Approve,
    Cancel,
    Complete,
}

impl TransferAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plan { .. } => "Lên kế hoạch",
            Self::Approve => "Duyệt",
            Self::Cancel => "Hủy",
            Self::Complete => "Hoàn thành",
        }
    }

    /// Та же проверка, что и на сервере
    pub fn is_allowed(&self, status: &str) -> bool {
        match self {
            Self::Plan { .. } => workflow::can_plan(status),
            Self::Approve => workflow::can_approve(status),
            Self::Cancel => workflow::can_cancel(status),
            Self::Complete => workflow::can_complete(status),
        }
    }
}

/// Значение из выпадающего списка склада; пустая строка - ничего не выбрано
pub fn parse_selection(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Отправить планирование. Без выбранного склада запрос не уходит.
pub async fn submit_planning<G: TransferGateway + ?Sized>(
    gateway: &G,
    transfer_id: &str,
    selected: Option<i64>,
) -> Result<(), OperationError> {
    let warehouse_id = selected
        .filter(|id| *id > 0)
        .ok_or_else(|| OperationError::validation("Vui lòng chọn kho thực hiện"))?;
    gateway
        .plan_transfer(transfer_id, &PlanningRequest { warehouse_id })
        .await
}

/// Полное утверждение, без количества
pub async fn approve_transfer<G: TransferGateway + ?Sized>(
    gateway: &G,
    transfer_id: &str,
) -> Result<(), OperationError> {
    gateway.approve_transfer(transfer_id).await
}

pub async fn reload<G: TransferGateway + ?Sized>(
    gateway: &G,
    query: &TransferListQuery,
) -> Result<Vec<WarehouseTransfer>, OperationError> {
    gateway.list_transfers(query).await
}

/// Результат действия: ответ на мутацию и, если она прошла, свежая коллекция
#[derive(Debug)]
pub struct ActionOutcome {
    pub result: Result<(), OperationError>,
    pub reloaded: Option<Result<Vec<WarehouseTransfer>, OperationError>>,
}

async fn mutate<G: TransferGateway + ?Sized>(
    gateway: &G,
    transfer: &WarehouseTransfer,
    action: TransferAction,
) -> Result<(), OperationError> {
    if !action.is_allowed(&transfer.status) {
        return Err(OperationError::validation(format!(
            "Không thể {} yêu cầu ở trạng thái '{}'",
            action.label().to_lowercase(),
            transfer.status
        )));
    }

    let id = transfer.to_string_id();
    match action {
        TransferAction::Plan { selected } => {
            if let Some(warehouse_id) = selected {
                transfer
                    .validate_planning(warehouse_id)
                    .map_err(OperationError::Validation)?;
            }
            submit_planning(gateway, &id, selected).await
        }
        TransferAction::Approve => approve_transfer(gateway, &id).await,
        TransferAction::Cancel => gateway.cancel_transfer(&id).await,
        TransferAction::Complete => gateway.complete_transfer(&id).await,
    }
}

/// Выполнить действие и после успеха перезагрузить коллекцию
pub async fn perform<G: TransferGateway + ?Sized>(
    gateway: &G,
    query: &TransferListQuery,
    transfer: &WarehouseTransfer,
    action: TransferAction,
) -> ActionOutcome {
    let result = mutate(gateway, transfer, action).await;
    if let Err(e) = &result {
        log::error!(
            "{} {} failed: {}",
            action.label(),
            transfer.request_code,
            e
        );
        return ActionOutcome {
            result,
            reloaded: None,
        };
    }

    let reloaded = reload(gateway, query).await;
    ActionOutcome {
        result,
        reloaded: Some(reloaded),
    }
}

/// Текст уведомления по итогу действия
pub fn notification_for(
    action: TransferAction,
    request_code: &str,
    result: &Result<(), OperationError>,
) -> (NotificationKind, String) {
    match result {
        Ok(()) => (
            NotificationKind::Success,
            format!("{}: {} thành công", request_code, action.label()),
        ),
        Err(e) if e.is_validation() => (NotificationKind::Warning, e.to_string()),
        Err(e) => (
            NotificationKind::Error,
            format!("{}: {} thất bại. {}", request_code, action.label(), e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_warehouse_transfer::ui::list::state::TransferListState;
    use crate::shared::dialog::DialogState;
    use contracts::domain::a002_warehouse_transfer::aggregate::CreateTransferDto;
    use contracts::domain::a002_warehouse_transfer::status::{TransferDirection, TransferStatus};
    use contracts::domain::common::TransitionError;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List(TransferListQuery),
        Plan(String, i64),
        Approve(String),
        Cancel(String),
        Complete(String),
    }

    /// Сервер в памяти: пишет журнал вызовов и двигает статусы по тем же правилам
    #[derive(Default)]
    struct RecordingGateway {
        calls: RefCell<Vec<Call>>,
        transfers: RefCell<Vec<WarehouseTransfer>>,
        fail_mutations_with: Option<OperationError>,
    }

    impl RecordingGateway {
        fn with(transfers: Vec<WarehouseTransfer>) -> Self {
            Self {
                transfers: RefCell::new(transfers),
                ..Self::default()
            }
        }

        fn failing(transfers: Vec<WarehouseTransfer>, error: OperationError) -> Self {
            Self {
                fail_mutations_with: Some(error),
                ..Self::with(transfers)
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn transition(
            &self,
            id: &str,
            target: fn(&str) -> Result<TransferStatus, TransitionError>,
        ) -> Result<(), OperationError> {
            if let Some(e) = &self.fail_mutations_with {
                return Err(e.clone());
            }
            let mut transfers = self.transfers.borrow_mut();
            let transfer = transfers
                .iter_mut()
                .find(|t| t.to_string_id() == id)
                .ok_or_else(|| OperationError::rejected(404, ""))?;
            let next = target(&transfer.status)
                .map_err(|e| OperationError::rejected(409, &format!(r#"{{"error":"{}"}}"#, e)))?;
            transfer.apply_status(next);
            Ok(())
        }
    }

    #[async_trait(?Send)]
    impl TransferGateway for RecordingGateway {
        async fn list_transfers(
            &self,
            query: &TransferListQuery,
        ) -> Result<Vec<WarehouseTransfer>, OperationError> {
            self.calls.borrow_mut().push(Call::List(*query));
            Ok(self
                .transfers
                .borrow()
                .iter()
                .filter(|t| t.belongs_to(query.warehouse_id, query.direction))
                .cloned()
                .collect())
        }

        async fn plan_transfer(
            &self,
            transfer_id: &str,
            request: &PlanningRequest,
        ) -> Result<(), OperationError> {
            self.calls
                .borrow_mut()
                .push(Call::Plan(transfer_id.to_string(), request.warehouse_id));
            self.transition(transfer_id, workflow::plan_target)?;
            let mut transfers = self.transfers.borrow_mut();
            if let Some(t) = transfers.iter_mut().find(|t| t.to_string_id() == transfer_id) {
                t.fulfilling_warehouse_id = Some(request.warehouse_id);
            }
            Ok(())
        }

        async fn approve_transfer(&self, transfer_id: &str) -> Result<(), OperationError> {
            self.calls
                .borrow_mut()
                .push(Call::Approve(transfer_id.to_string()));
            self.transition(transfer_id, workflow::approve_target)
        }

        async fn cancel_transfer(&self, transfer_id: &str) -> Result<(), OperationError> {
            self.calls
                .borrow_mut()
                .push(Call::Cancel(transfer_id.to_string()));
            self.transition(transfer_id, workflow::cancel_target)
        }

        async fn complete_transfer(&self, transfer_id: &str) -> Result<(), OperationError> {
            self.calls
                .borrow_mut()
                .push(Call::Complete(transfer_id.to_string()));
            self.transition(transfer_id, workflow::complete_target)
        }
    }

    const SOURCE: i64 = 1;
    const DESTINATION: i64 = 2;

    fn transfer(code: &str, status: &str) -> WarehouseTransfer {
        let mut t = WarehouseTransfer::new_for_insert(CreateTransferDto {
            request_code: Some(code.into()),
            source_warehouse_id: SOURCE,
            destination_warehouse_id: DESTINATION,
            ..Default::default()
        });
        t.status = status.into();
        t
    }

    fn outgoing() -> TransferListQuery {
        TransferListQuery {
            warehouse_id: SOURCE,
            direction: TransferDirection::Outgoing,
        }
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("7"), Some(7));
        assert_eq!(parse_selection(" 12 "), Some(12));
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("0"), None);
        assert_eq!(parse_selection("kho"), None);
    }

    #[tokio::test]
    async fn test_planning_happy_path_sends_one_request_then_reloads() {
        let pending = transfer("TR-0001", "pending");
        let id = pending.to_string_id();
        let gateway = RecordingGateway::with(vec![pending.clone()]);

        let outcome = perform(
            &gateway,
            &outgoing(),
            &pending,
            TransferAction::Plan {
                selected: parse_selection("7"),
            },
        )
        .await;

        assert!(outcome.result.is_ok());
        assert_eq!(
            gateway.calls(),
            vec![Call::Plan(id.clone(), 7), Call::List(outgoing())]
        );

        let reloaded = outcome.reloaded.unwrap().unwrap();
        assert_eq!(reloaded[0].status, "planned");
        assert_eq!(reloaded[0].fulfilling_warehouse_id, Some(7));
    }

    #[test]
    fn test_planning_body_carries_warehouse_id() {
        let request = PlanningRequest { warehouse_id: 7 };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            serde_json::json!({ "warehouseId": 7 })
        );
    }

    #[tokio::test]
    async fn test_planning_without_selection_sends_nothing() {
        let pending = transfer("TR-0002", "pending");
        let gateway = RecordingGateway::with(vec![pending.clone()]);

        let outcome = perform(
            &gateway,
            &outgoing(),
            &pending,
            TransferAction::Plan {
                selected: parse_selection(""),
            },
        )
        .await;

        assert!(gateway.calls().is_empty());
        assert!(outcome.reloaded.is_none());
        let err = outcome.result.unwrap_err();
        assert!(err.is_validation());

        let (kind, message) = notification_for(
            TransferAction::Plan { selected: None },
            "TR-0002",
            &Err(err),
        );
        assert_eq!(kind, NotificationKind::Warning);
        assert!(message.contains("chọn kho"));
    }

    #[tokio::test]
    async fn test_submit_planning_validates_before_network() {
        let gateway = RecordingGateway::default();
        let err = submit_planning(&gateway, "any", None).await.unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_planning_to_destination_is_rejected_locally() {
        let pending = transfer("TR-0003", "pending");
        let gateway = RecordingGateway::with(vec![pending.clone()]);

        let outcome = perform(
            &gateway,
            &outgoing(),
            &pending,
            TransferAction::Plan {
                selected: Some(DESTINATION),
            },
        )
        .await;

        assert!(outcome.result.unwrap_err().is_validation());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_approval_failure_leaves_state_and_dialog() {
        let pending = transfer("TR-0004", "pending");
        let gateway = RecordingGateway::failing(
            vec![pending.clone()],
            OperationError::rejected(500, r#"{"error":"Internal server error"}"#),
        );

        let mut state = TransferListState::default();
        state.apply_collection(vec![pending.clone()]);
        let mut dialog = DialogState::opened();
        assert!(dialog.begin_submit());

        let outcome = perform(&gateway, &outgoing(), &pending, TransferAction::Approve).await;
        dialog.finish(&outcome.result);
        if let Some(Ok(items)) = outcome.reloaded {
            state.apply_collection(items);
        }

        assert_eq!(gateway.calls(), vec![Call::Approve(pending.to_string_id())]);
        assert_eq!(state.transfers[0].status, "pending");
        assert!(dialog.open);
        assert!(!dialog.submitting);
        assert!(dialog.error.as_deref().unwrap_or("").contains("500"));

        let (kind, message) =
            notification_for(TransferAction::Approve, "TR-0004", &outcome.result);
        assert_eq!(kind, NotificationKind::Error);
        assert!(message.contains("TR-0004"));
    }

    #[tokio::test]
    async fn test_approval_success_closes_dialog_and_refetches() {
        let planned = transfer("TR-0005", "planned");
        let gateway = RecordingGateway::with(vec![planned.clone()]);
        let mut dialog = DialogState::opened();
        dialog.begin_submit();

        let outcome = perform(&gateway, &outgoing(), &planned, TransferAction::Approve).await;
        dialog.finish(&outcome.result);

        assert!(!dialog.open);
        assert_eq!(gateway.calls().len(), 2);
        assert_eq!(outcome.reloaded.unwrap().unwrap()[0].status, "approved");
    }

    #[tokio::test]
    async fn test_disallowed_action_is_not_sent() {
        let completed = transfer("TR-0006", "COMPLETED");
        let gateway = RecordingGateway::with(vec![completed.clone()]);

        for action in [
            TransferAction::Approve,
            TransferAction::Plan { selected: Some(5) },
            TransferAction::Cancel,
        ] {
            let outcome = perform(&gateway, &outgoing(), &completed, action).await;
            assert!(outcome.result.unwrap_err().is_validation());
        }
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_server_conflict_surfaces_as_rejected() {
        // локальная копия устарела: на сервере перемещение уже утверждено
        let stale = transfer("TR-0007", "planned");
        let mut current = stale.clone();
        current.status = "approved".into();
        let gateway = RecordingGateway::with(vec![current]);

        let outcome = perform(&gateway, &outgoing(), &stale, TransferAction::Approve).await;
        assert_eq!(outcome.result.unwrap_err().status(), Some(409));
        assert!(outcome.reloaded.is_none());
    }
}

//! Действия по заявкам на отгрузку.
//!
//! Как и у перемещений: проверка доступности тем же правилом, что на сервере,
//! затем запрос и перезагрузка списка после успеха.

use async_trait::async_trait;
use contracts::domain::a003_export_request::aggregate::ExportRequest;
use contracts::domain::a003_export_request::workflow::{
    can_approve_request, can_cancel_request, can_create_export_from_approved_request, can_process,
};

use crate::shared::notifications::NotificationKind;
use crate::shared::operation_error::OperationError;

#[async_trait(?Send)]
pub trait ExportRequestGateway {
    async fn list_requests(&self) -> Result<Vec<ExportRequest>, OperationError>;

    async fn process_request(&self, request_id: &str) -> Result<(), OperationError>;

    async fn approve_request(&self, request_id: &str) -> Result<(), OperationError>;

    async fn cancel_request(&self, request_id: &str) -> Result<(), OperationError>;

    /// Создать расходный документ по утверждённой заявке
    async fn create_receipt(&self, request_id: &str) -> Result<(), OperationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRequestAction {
    Process,
    Approve,
    Cancel,
    CreateReceipt,
}

impl ExportRequestAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Process => "Xử lý",
            Self::Approve => "Duyệt",
            Self::Cancel => "Hủy",
            Self::CreateReceipt => "Tạo phiếu xuất",
        }
    }

    pub fn is_allowed(&self, status: &str) -> bool {
        match self {
            Self::Process => can_process(status),
            Self::Approve => can_approve_request(status),
            Self::Cancel => can_cancel_request(status),
            Self::CreateReceipt => can_create_export_from_approved_request(status),
        }
    }
}

#[derive(Debug)]
pub struct ActionOutcome {
    pub result: Result<(), OperationError>,
    pub reloaded: Option<Result<Vec<ExportRequest>, OperationError>>,
}

pub async fn perform<G: ExportRequestGateway + ?Sized>(
    gateway: &G,
    request: &ExportRequest,
    action: ExportRequestAction,
) -> ActionOutcome {
    let result = if action.is_allowed(&request.status) {
        let id = request.to_string_id();
        match action {
            ExportRequestAction::Process => gateway.process_request(&id).await,
            ExportRequestAction::Approve => gateway.approve_request(&id).await,
            ExportRequestAction::Cancel => gateway.cancel_request(&id).await,
            ExportRequestAction::CreateReceipt => gateway.create_receipt(&id).await,
        }
    } else {
        Err(OperationError::validation(format!(
            "Không thể {} yêu cầu ở trạng thái '{}'",
            action.label().to_lowercase(),
            request.status
        )))
    };

    if let Err(e) = &result {
        log::error!("{} {} failed: {}", action.label(), request.request_code, e);
        return ActionOutcome {
            result,
            reloaded: None,
        };
    }
    ActionOutcome {
        result,
        reloaded: Some(gateway.list_requests().await),
    }
}

pub fn notification_for(
    action: ExportRequestAction,
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
    use contracts::domain::a003_export_request::aggregate::CreateExportRequestDto;
    use contracts::domain::a003_export_request::status::ExportRequestStatus;
    use contracts::domain::a003_export_request::workflow::approve_target;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingGateway {
        calls: RefCell<Vec<String>>,
        requests: RefCell<Vec<ExportRequest>>,
        receipts: RefCell<Vec<String>>,
    }

    impl RecordingGateway {
        fn record(&self, call: &str, id: &str) {
            self.calls.borrow_mut().push(format!("{} {}", call, id));
        }
    }

    #[async_trait(?Send)]
    impl ExportRequestGateway for RecordingGateway {
        async fn list_requests(&self) -> Result<Vec<ExportRequest>, OperationError> {
            self.calls.borrow_mut().push("list".into());
            Ok(self.requests.borrow().clone())
        }

        async fn process_request(&self, request_id: &str) -> Result<(), OperationError> {
            self.record("process", request_id);
            Ok(())
        }

        async fn approve_request(&self, request_id: &str) -> Result<(), OperationError> {
            self.record("approve", request_id);
            let mut requests = self.requests.borrow_mut();
            let request = requests
                .iter_mut()
                .find(|r| r.to_string_id() == request_id)
                .ok_or_else(|| OperationError::rejected(404, ""))?;
            let next = approve_target(&request.status)
                .map_err(|e| OperationError::rejected(409, &e.to_string()))?;
            request.apply_status(next);
            Ok(())
        }

        async fn cancel_request(&self, request_id: &str) -> Result<(), OperationError> {
            self.record("cancel", request_id);
            Ok(())
        }

        async fn create_receipt(&self, request_id: &str) -> Result<(), OperationError> {
            self.record("receipt", request_id);
            if self.receipts.borrow().iter().any(|r| r == request_id) {
                return Err(OperationError::rejected(
                    409,
                    r#"{"error":"receipt already exists"}"#,
                ));
            }
            self.receipts.borrow_mut().push(request_id.to_string());
            Ok(())
        }
    }

    fn request(status: &str) -> ExportRequest {
        let mut r = ExportRequest::new_for_insert(CreateExportRequestDto {
            request_code: Some("YC-0001".into()),
            agency_name: "Đại lý Minh Anh".into(),
            warehouse_id: 1,
            ..Default::default()
        });
        r.status = status.into();
        r
    }

    #[tokio::test]
    async fn test_approve_then_reload() {
        let r = request("processing");
        let gateway = RecordingGateway {
            requests: RefCell::new(vec![r.clone()]),
            ..Default::default()
        };
        let outcome = perform(&gateway, &r, ExportRequestAction::Approve).await;
        assert!(outcome.result.is_ok());
        let reloaded = outcome.reloaded.unwrap().unwrap();
        assert_eq!(
            reloaded[0].status_kind(),
            Some(ExportRequestStatus::Approved)
        );
        assert_eq!(gateway.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_receipt_only_from_approved_request() {
        let gateway = RecordingGateway::default();
        let outcome = perform(&gateway, &request("requested"), ExportRequestAction::CreateReceipt).await;
        assert!(outcome.result.unwrap_err().is_validation());
        assert!(gateway.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_second_receipt_is_rejected() {
        let approved = request("approved");
        let gateway = RecordingGateway::default();

        let first = perform(&gateway, &approved, ExportRequestAction::CreateReceipt).await;
        assert!(first.result.is_ok());

        let second = perform(&gateway, &approved, ExportRequestAction::CreateReceipt).await;
        let err = second.result.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert!(second.reloaded.is_none());

        let (kind, message) =
            notification_for(ExportRequestAction::CreateReceipt, "YC-0001", &Err(err));
        assert_eq!(kind, NotificationKind::Error);
        assert!(message.contains("receipt already exists"));
    }

    #[test]
    fn test_cancelled_request_has_no_actions() {
        for action in [
            ExportRequestAction::Process,
            ExportRequestAction::Approve,
            ExportRequestAction::Cancel,
            ExportRequestAction::CreateReceipt,
        ] {
            assert!(!action.is_allowed("cancelled"));
        }
    }
}

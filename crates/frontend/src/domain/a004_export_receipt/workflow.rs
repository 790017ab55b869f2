//! Утверждение строк расходного документа.
//!
//! Количество приводится к `[1, requested]` ещё в диалоге, сервер проверяет
//! тот же диапазон. После успеха владелец списка перезагружает документы.

use async_trait::async_trait;
use contracts::domain::a004_export_receipt::aggregate::{
    ApproveLineRequest, ExportReceipt, ReceiptLine,
};
use contracts::domain::a004_export_receipt::quantity::{check_approved_quantity, QuantityCheck};

use crate::shared::notifications::NotificationKind;
use crate::shared::operation_error::OperationError;

#[async_trait(?Send)]
pub trait ReceiptGateway {
    async fn list_receipts(&self) -> Result<Vec<ExportReceipt>, OperationError>;

    async fn approve_line(
        &self,
        line_id: &str,
        request: &ApproveLineRequest,
    ) -> Result<(), OperationError>;
}

/// Ввод количества: допускается запятая как десятичный разделитель
pub fn parse_quantity(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Состояние ввода в диалоге утверждения строки
#[derive(Debug, Clone, PartialEq)]
pub struct LineApproval {
    pub line_id: String,
    pub requested: f64,
    pub raw: String,
}

impl LineApproval {
    /// По умолчанию предлагается запрошенное количество
    pub fn for_line(line: &ReceiptLine) -> Self {
        Self {
            line_id: line.id.to_string(),
            requested: line.requested_quantity,
            raw: line.requested_quantity.to_string(),
        }
    }

    /// Проверка текущего ввода; `None`, если это не число
    pub fn check(&self) -> Option<QuantityCheck> {
        parse_quantity(&self.raw).map(|entered| check_approved_quantity(entered, self.requested))
    }
}

/// PUT `/api/export-receipts/{lineId}/approve` с `{"approvedQuantity": N}`
pub async fn approve_receipt_line<G: ReceiptGateway + ?Sized>(
    gateway: &G,
    line_id: &str,
    approved_quantity: f64,
) -> Result<(), OperationError> {
    if !approved_quantity.is_finite() || approved_quantity <= 0.0 {
        return Err(OperationError::validation("Số lượng duyệt không hợp lệ"));
    }
    gateway
        .approve_line(
            line_id,
            &ApproveLineRequest {
                approved_quantity: Some(approved_quantity),
            },
        )
        .await
}

#[derive(Debug)]
pub struct ApprovalOutcome {
    pub result: Result<(), OperationError>,
    /// Количество, которое ушло на сервер (после приведения к диапазону)
    pub sent_quantity: Option<f64>,
    pub reloaded: Option<Result<Vec<ExportReceipt>, OperationError>>,
}

/// Утвердить строку по вводу из диалога и после успеха перезагрузить список
pub async fn submit_line_approval<G: ReceiptGateway + ?Sized>(
    gateway: &G,
    approval: &LineApproval,
) -> ApprovalOutcome {
    let Some(check) = approval.check() else {
        return ApprovalOutcome {
            result: Err(OperationError::validation("Vui lòng nhập số lượng")),
            sent_quantity: None,
            reloaded: None,
        };
    };

    let result = approve_receipt_line(gateway, &approval.line_id, check.value).await;
    if let Err(e) = &result {
        log::error!("approve receipt line {} failed: {}", approval.line_id, e);
        return ApprovalOutcome {
            result,
            sent_quantity: Some(check.value),
            reloaded: None,
        };
    }

    ApprovalOutcome {
        result,
        sent_quantity: Some(check.value),
        reloaded: Some(gateway.list_receipts().await),
    }
}

pub fn notification_for(receipt_code: &str, result: &Result<(), OperationError>) -> (NotificationKind, String) {
    match result {
        Ok(()) => (
            NotificationKind::Success,
            format!("{}: đã duyệt dòng hàng", receipt_code),
        ),
        Err(e) if e.is_validation() => (NotificationKind::Warning, e.to_string()),
        Err(e) => (
            NotificationKind::Error,
            format!("{}: duyệt dòng hàng thất bại. {}", receipt_code, e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_export_request::aggregate::{
        CreateExportRequestDto, ExportRequest, ExportRequestLine,
    };
    use contracts::domain::a004_export_receipt::aggregate::ApproveLineError;
    use std::cell::RefCell;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingGateway {
        sent: RefCell<Vec<(String, Option<f64>)>>,
        receipts: RefCell<Vec<ExportReceipt>>,
    }

    #[async_trait(?Send)]
    impl ReceiptGateway for RecordingGateway {
        async fn list_receipts(&self) -> Result<Vec<ExportReceipt>, OperationError> {
            Ok(self.receipts.borrow().clone())
        }

        async fn approve_line(
            &self,
            line_id: &str,
            request: &ApproveLineRequest,
        ) -> Result<(), OperationError> {
            self.sent
                .borrow_mut()
                .push((line_id.to_string(), request.approved_quantity));
            let id = Uuid::parse_str(line_id).map_err(|_| OperationError::rejected(400, ""))?;
            let mut receipts = self.receipts.borrow_mut();
            let receipt = receipts
                .iter_mut()
                .find(|r| r.line(id).is_some())
                .ok_or_else(|| OperationError::rejected(404, ""))?;
            receipt
                .approve_line(id, request.approved_quantity)
                .map_err(|e| match e {
                    ApproveLineError::NotPending(_) => OperationError::rejected(409, ""),
                    _ => OperationError::rejected(400, ""),
                })
        }
    }

    fn receipt(quantities: &[f64]) -> ExportReceipt {
        let request = ExportRequest::new_for_insert(CreateExportRequestDto {
            request_code: Some("YC-0002".into()),
            agency_name: "Đại lý Hòa Bình".into(),
            warehouse_id: 1,
            lines: quantities
                .iter()
                .enumerate()
                .map(|(i, q)| ExportRequestLine {
                    product_id: i as i64 + 1,
                    quantity: *q,
                    unit: "thùng".into(),
                })
                .collect(),
            notes: None,
        });
        ExportReceipt::from_request(&request)
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12"), Some(12.0));
        assert_eq!(parse_quantity(" 2,5 "), Some(2.5));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("abc"), None);
    }

    #[test]
    fn test_check_warns_when_exceeding_request() {
        let r = receipt(&[10.0]);
        let mut approval = LineApproval::for_line(&r.lines[0]);
        assert_eq!(approval.check().unwrap().warning, None);

        approval.raw = "25".into();
        let check = approval.check().unwrap();
        assert_eq!(check.value, 10.0);
        assert!(check.warning.is_some());
    }

    #[tokio::test]
    async fn test_exceeding_quantity_is_clamped_before_sending() {
        let r = receipt(&[10.0, 4.0]);
        let line_id = r.lines[0].id.to_string();
        let gateway = RecordingGateway {
            receipts: RefCell::new(vec![r.clone()]),
            ..Default::default()
        };

        let mut approval = LineApproval::for_line(&r.lines[0]);
        approval.raw = "25".into();
        let outcome = submit_line_approval(&gateway, &approval).await;

        assert!(outcome.result.is_ok());
        assert_eq!(outcome.sent_quantity, Some(10.0));
        assert_eq!(gateway.sent.borrow().as_slice(), &[(line_id, Some(10.0))]);

        let reloaded = outcome.reloaded.unwrap().unwrap();
        assert_eq!(reloaded[0].approved_count(), 1);
        assert_eq!(reloaded[0].status, "pending");
    }

    #[tokio::test]
    async fn test_last_line_completes_receipt() {
        let r = receipt(&[3.0]);
        let gateway = RecordingGateway {
            receipts: RefCell::new(vec![r.clone()]),
            ..Default::default()
        };
        let outcome = submit_line_approval(&gateway, &LineApproval::for_line(&r.lines[0])).await;
        let reloaded = outcome.reloaded.unwrap().unwrap();
        assert_eq!(reloaded[0].status, "completed");
        assert_eq!(reloaded[0].lines[0].approved_quantity, Some(3.0));
    }

    #[tokio::test]
    async fn test_non_numeric_input_sends_nothing() {
        let r = receipt(&[5.0]);
        let gateway = RecordingGateway::default();
        let mut approval = LineApproval::for_line(&r.lines[0]);
        approval.raw = "năm".into();

        let outcome = submit_line_approval(&gateway, &approval).await;
        assert!(outcome.result.unwrap_err().is_validation());
        assert!(gateway.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_second_approval_of_line_is_conflict() {
        let r = receipt(&[5.0, 5.0]);
        let gateway = RecordingGateway {
            receipts: RefCell::new(vec![r.clone()]),
            ..Default::default()
        };
        let approval = LineApproval::for_line(&r.lines[0]);
        assert!(submit_line_approval(&gateway, &approval).await.result.is_ok());

        let again = submit_line_approval(&gateway, &approval).await;
        let err = again.result.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert!(again.reloaded.is_none());
        let (kind, _) = notification_for(&r.receipt_code, &Err(err));
        assert_eq!(kind, NotificationKind::Error);
    }
}

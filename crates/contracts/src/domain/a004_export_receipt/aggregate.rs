use super::quantity::is_within_bounds;
use crate::domain::a002_warehouse_transfer::status::TransferStatus;
use crate::domain::a003_export_request::aggregate::ExportRequest;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata, TransitionError};
use crate::shared::list_query::Searchable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// ID расходного документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportReceiptId(pub Uuid);

impl ExportReceiptId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ExportReceiptId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ExportReceiptId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Строка расходного документа. Утверждается отдельно, по своему ID.
///
/// Статусы строки и документа берутся из словаря перемещений
/// (`pending` → `approved`, документ `pending` → `completed`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub id: Uuid,
    pub product_id: i64,
    #[serde(default)]
    pub unit: String,
    pub requested_quantity: f64,
    #[serde(default)]
    pub approved_quantity: Option<f64>,
    pub status: String,
}

impl ReceiptLine {
    pub fn is_pending(&self) -> bool {
        TransferStatus::parse(&self.status) == Some(TransferStatus::Pending)
    }

    pub fn is_approved(&self) -> bool {
        TransferStatus::parse(&self.status) == Some(TransferStatus::Approved)
    }
}

/// Ошибки утверждения строки
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApproveLineError {
    #[error("receipt line {0} not found")]
    LineNotFound(Uuid),

    #[error(transparent)]
    NotPending(#[from] TransitionError),

    #[error("approved quantity {given} is outside [1, {requested}]")]
    QuantityOutOfRange { given: f64, requested: f64 },
}

/// Расходный документ (phiếu xuất kho), созданный по утверждённой заявке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub id: ExportReceiptId,
    pub receipt_code: String,
    pub export_request_id: String,
    pub request_code: String,
    pub warehouse_id: i64,
    pub created_at: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub lines: Vec<ReceiptLine>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl ExportReceipt {
    /// Сформировать документ по заявке; все строки ожидают утверждения
    pub fn from_request(request: &ExportRequest) -> Self {
        let id = ExportReceiptId::new_v4();
        let lines = request
            .lines
            .iter()
            .map(|l| ReceiptLine {
                id: Uuid::new_v4(),
                product_id: l.product_id,
                unit: l.unit.clone(),
                requested_quantity: l.quantity,
                approved_quantity: None,
                status: TransferStatus::Pending.as_str().to_string(),
            })
            .collect();
        Self {
            id,
            receipt_code: format!("PX-{}", &id.as_string()[..8]),
            export_request_id: request.to_string_id(),
            request_code: request.request_code.clone(),
            warehouse_id: request.warehouse_id,
            created_at: Utc::now(),
            status: TransferStatus::Pending.as_str().to_string(),
            lines,
            notes: request.notes.clone(),
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn line(&self, line_id: Uuid) -> Option<&ReceiptLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn approved_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_approved()).count()
    }

    pub fn all_lines_approved(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.is_approved())
    }

    /// Утвердить строку. Без количества утверждается запрошенное.
    ///
    /// Когда утверждены все строки, документ переходит в `completed`.
    pub fn approve_line(
        &mut self,
        line_id: Uuid,
        approved_quantity: Option<f64>,
    ) -> Result<(), ApproveLineError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or(ApproveLineError::LineNotFound(line_id))?;

        if !line.is_pending() {
            return Err(TransitionError::new(line.status.clone(), "approve").into());
        }

        let quantity = approved_quantity.unwrap_or(line.requested_quantity);
        if !is_within_bounds(quantity, line.requested_quantity) {
            return Err(ApproveLineError::QuantityOutOfRange {
                given: quantity,
                requested: line.requested_quantity,
            });
        }

        line.approved_quantity = Some(quantity);
        line.status = TransferStatus::Approved.as_str().to_string();

        if self.all_lines_approved() {
            self.status = TransferStatus::Completed.as_str().to_string();
        }
        self.before_write();
        Ok(())
    }
}

impl AggregateRoot for ExportReceipt {
    type Id = ExportReceiptId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.receipt_code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }
}

impl Searchable for ExportReceipt {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.receipt_code.as_str(), self.request_code.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes.as_str());
        }
        fields
    }

    fn status(&self) -> &str {
        &self.status
    }
}

/// Тело запроса утверждения строки
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveLineRequest {
    #[serde(default)]
    pub approved_quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_export_request::aggregate::{
        CreateExportRequestDto, ExportRequestLine,
    };

    fn receipt(quantities: &[f64]) -> ExportReceipt {
        let request = ExportRequest::new_for_insert(CreateExportRequestDto {
            agency_name: "Đại lý Phú Thịnh".into(),
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
            ..Default::default()
        });
        ExportReceipt::from_request(&request)
    }

    #[test]
    fn test_from_request_copies_lines_as_pending() {
        let r = receipt(&[5.0, 8.0]);
        assert_eq!(r.lines.len(), 2);
        assert!(r.lines.iter().all(|l| l.is_pending()));
        assert_eq!(r.status, "pending");
        assert!(r.receipt_code.starts_with("PX-"));
    }

    #[test]
    fn test_approve_line_with_quantity() {
        let mut r = receipt(&[5.0, 8.0]);
        let first = r.lines[0].id;
        r.approve_line(first, Some(3.0)).unwrap();
        assert_eq!(r.line(first).unwrap().approved_quantity, Some(3.0));
        assert!(r.line(first).unwrap().is_approved());
        assert_eq!(r.status, "pending");
        assert_eq!(r.approved_count(), 1);
    }

    #[test]
    fn test_last_line_completes_receipt() {
        let mut r = receipt(&[5.0, 8.0]);
        let ids: Vec<Uuid> = r.lines.iter().map(|l| l.id).collect();
        for id in ids {
            r.approve_line(id, None).unwrap();
        }
        assert!(r.all_lines_approved());
        assert_eq!(r.status, "completed");
        assert_eq!(r.lines[1].approved_quantity, Some(8.0));
    }

    #[test]
    fn test_quantity_out_of_range_is_rejected() {
        let mut r = receipt(&[5.0]);
        let id = r.lines[0].id;
        let err = r.approve_line(id, Some(6.0)).unwrap_err();
        assert_eq!(
            err,
            ApproveLineError::QuantityOutOfRange {
                given: 6.0,
                requested: 5.0
            }
        );
        assert!(r.approve_line(id, Some(0.0)).is_err());
        assert!(r.lines[0].is_pending());
    }

    #[test]
    fn test_double_approval_is_rejected() {
        let mut r = receipt(&[5.0]);
        let id = r.lines[0].id;
        r.approve_line(id, None).unwrap();
        assert!(matches!(
            r.approve_line(id, None),
            Err(ApproveLineError::NotPending(_))
        ));
    }

    #[test]
    fn test_unknown_line() {
        let mut r = receipt(&[5.0]);
        let missing = Uuid::new_v4();
        assert_eq!(
            r.approve_line(missing, None),
            Err(ApproveLineError::LineNotFound(missing))
        );
    }

    #[test]
    fn test_empty_receipt_is_not_complete() {
        let r = receipt(&[]);
        assert!(!r.all_lines_approved());
    }
}

use super::repository;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use contracts::domain::a003_export_request::aggregate::ExportRequest;
use contracts::domain::a004_export_receipt::aggregate::{
    ApproveLineError, ApproveLineRequest, ExportReceipt,
};
use uuid::Uuid;

pub async fn list_all() -> ServiceResult<Vec<ExportReceipt>> {
    Ok(repository::list_all().await?)
}

pub async fn get_by_id(id: &str) -> ServiceResult<ExportReceipt> {
    let uuid = parse_uuid(id)?;
    repository::get_by_id(uuid)
        .await?
        .ok_or_else(|| ServiceError::not_found("export receipt", id))
}

/// Один документ на заявку; повторный вызов - конфликт
pub async fn create_from_request(request: &ExportRequest) -> ServiceResult<ExportReceipt> {
    let request_id = request.to_string_id();
    if let Some(existing) = repository::get_by_request_id(&request_id).await? {
        return Err(ServiceError::Conflict(format!(
            "Export request {} already has receipt {}",
            request.request_code, existing.receipt_code
        )));
    }
    let receipt = ExportReceipt::from_request(request);
    repository::insert(&receipt).await?;
    tracing::info!(
        "export receipt {} created from request {} ({} lines)",
        receipt.receipt_code,
        request.request_code,
        receipt.lines.len()
    );
    Ok(receipt)
}

impl From<ApproveLineError> for ServiceError {
    fn from(e: ApproveLineError) -> Self {
        match e {
            ApproveLineError::LineNotFound(id) => {
                ServiceError::not_found("receipt line", &id.to_string())
            }
            ApproveLineError::NotPending(t) => t.into(),
            e @ ApproveLineError::QuantityOutOfRange { .. } => {
                ServiceError::Validation(e.to_string())
            }
        }
    }
}

/// Утвердить строку в уже загруженном документе
pub fn apply_line_approval(
    receipt: &mut ExportReceipt,
    line_id: Uuid,
    request: ApproveLineRequest,
) -> ServiceResult<()> {
    if let Some(q) = request.approved_quantity {
        if !q.is_finite() {
            return Err(ServiceError::Validation("approvedQuantity must be a number".into()));
        }
    }
    receipt.approve_line(line_id, request.approved_quantity)?;
    Ok(())
}

/// PUT /api/export-receipts/{lineId}/approve
pub async fn approve_line(line_id: &str, request: ApproveLineRequest) -> ServiceResult<ExportReceipt> {
    let line_uuid = parse_uuid(line_id)?;
    let mut receipt = repository::find_by_line_id(line_uuid)
        .await?
        .ok_or_else(|| ServiceError::not_found("receipt line", line_id))?;
    let expected_version = receipt.metadata.version;

    apply_line_approval(&mut receipt, line_uuid, request).map_err(|e| {
        tracing::warn!("receipt line {}: approve rejected: {}", line_id, e);
        e
    })?;

    if !repository::update_lines(&receipt, expected_version).await? {
        return Err(ServiceError::Conflict(format!(
            "Receipt {} was modified concurrently",
            receipt.receipt_code
        )));
    }
    tracing::info!(
        "receipt {}: line {} approved ({}/{}), status {}",
        receipt.receipt_code,
        line_id,
        receipt.approved_count(),
        receipt.lines.len(),
        receipt.status
    );
    Ok(receipt)
}

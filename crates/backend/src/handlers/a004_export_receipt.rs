use axum::{extract::Path, Json};
use contracts::domain::a004_export_receipt::aggregate::{ApproveLineRequest, ExportReceipt};

use crate::domain::a004_export_receipt;
use crate::shared::error::ServiceResult;
use crate::system::auth::extractor::Operator;

/// GET /api/export-receipts
pub async fn list_all() -> ServiceResult<Json<Vec<ExportReceipt>>> {
    Ok(Json(a004_export_receipt::service::list_all().await?))
}

/// GET /api/export-receipts/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<ExportReceipt>> {
    Ok(Json(a004_export_receipt::service::get_by_id(&id).await?))
}

/// PUT /api/export-receipts/:line_id/approve
pub async fn approve_line(
    operator: Operator,
    Path(line_id): Path<String>,
    Json(request): Json<ApproveLineRequest>,
) -> ServiceResult<Json<ExportReceipt>> {
    tracing::info!(
        operator = operator.username(),
        "receipt line {}: approve {:?}",
        line_id,
        request.approved_quantity
    );
    Ok(Json(
        a004_export_receipt::service::approve_line(&line_id, request).await?,
    ))
}

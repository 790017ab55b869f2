use axum::{extract::Path, Json};
use contracts::domain::a003_export_request::aggregate::{CreateExportRequestDto, ExportRequest};
use contracts::domain::a004_export_receipt::aggregate::ExportReceipt;

use crate::domain::a003_export_request;
use crate::shared::error::ServiceResult;
use crate::system::auth::extractor::Operator;

/// GET /api/export-requests
pub async fn list_all() -> ServiceResult<Json<Vec<ExportRequest>>> {
    Ok(Json(a003_export_request::service::list_all().await?))
}

/// GET /api/export-requests/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<ExportRequest>> {
    Ok(Json(a003_export_request::service::get_by_id(&id).await?))
}

/// POST /api/export-requests
pub async fn create(Json(dto): Json<CreateExportRequestDto>) -> ServiceResult<Json<ExportRequest>> {
    Ok(Json(a003_export_request::service::create(dto).await?))
}

/// POST /api/export-requests/:id/process
pub async fn process(
    operator: Operator,
    Path(id): Path<String>,
) -> ServiceResult<Json<ExportRequest>> {
    tracing::info!(operator = operator.username(), "export request {}: process", id);
    Ok(Json(a003_export_request::service::process(&id).await?))
}

/// POST /api/export-requests/:id/approve
pub async fn approve(
    operator: Operator,
    Path(id): Path<String>,
) -> ServiceResult<Json<ExportRequest>> {
    tracing::info!(operator = operator.username(), "export request {}: approve", id);
    Ok(Json(a003_export_request::service::approve(&id).await?))
}

/// POST /api/export-requests/:id/cancel
pub async fn cancel(
    operator: Operator,
    Path(id): Path<String>,
) -> ServiceResult<Json<ExportRequest>> {
    tracing::info!(operator = operator.username(), "export request {}: cancel", id);
    Ok(Json(a003_export_request::service::cancel(&id).await?))
}

/// POST /api/export-requests/:id/receipt
pub async fn create_receipt(
    operator: Operator,
    Path(id): Path<String>,
) -> ServiceResult<Json<ExportReceipt>> {
    tracing::info!(operator = operator.username(), "export request {}: create_receipt", id);
    Ok(Json(a003_export_request::service::create_receipt(&id).await?))
}

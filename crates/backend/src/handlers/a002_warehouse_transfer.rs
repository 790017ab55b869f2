use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a002_warehouse_transfer::aggregate::{
    CreateTransferDto, PlanningRequest, TransferListQuery, WarehouseTransfer,
};

use crate::domain::a002_warehouse_transfer;
use crate::shared::error::ServiceResult;
use crate::system::auth::extractor::Operator;

/// GET /api/transfers?warehouseId=1&direction=outgoing
pub async fn list(Query(query): Query<TransferListQuery>) -> ServiceResult<Json<Vec<WarehouseTransfer>>> {
    Ok(Json(a002_warehouse_transfer::service::list(query).await?))
}

/// GET /api/transfers/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<WarehouseTransfer>> {
    Ok(Json(a002_warehouse_transfer::service::get_by_id(&id).await?))
}

/// POST /api/transfers
pub async fn create(Json(dto): Json<CreateTransferDto>) -> ServiceResult<Json<WarehouseTransfer>> {
    Ok(Json(a002_warehouse_transfer::service::create(dto).await?))
}

/// POST /api/transfers/:id/plan
pub async fn plan(
    operator: Operator,
    Path(id): Path<String>,
    Json(request): Json<PlanningRequest>,
) -> ServiceResult<Json<WarehouseTransfer>> {
    tracing::info!(
        operator = operator.username(),
        "transfer {}: plan -> warehouse {}",
        id,
        request.warehouse_id
    );
    Ok(Json(a002_warehouse_transfer::service::plan(&id, request).await?))
}

/// POST /api/transfers/:id/approve
pub async fn approve(
    operator: Operator,
    Path(id): Path<String>,
) -> ServiceResult<Json<WarehouseTransfer>> {
    tracing::info!(operator = operator.username(), "transfer {}: approve", id);
    Ok(Json(a002_warehouse_transfer::service::approve(&id).await?))
}

/// POST /api/transfers/:id/cancel
pub async fn cancel(
    operator: Operator,
    Path(id): Path<String>,
) -> ServiceResult<Json<WarehouseTransfer>> {
    tracing::info!(operator = operator.username(), "transfer {}: cancel", id);
    Ok(Json(a002_warehouse_transfer::service::cancel(&id).await?))
}

/// POST /api/transfers/:id/complete
pub async fn complete(
    operator: Operator,
    Path(id): Path<String>,
) -> ServiceResult<Json<WarehouseTransfer>> {
    tracing::info!(operator = operator.username(), "transfer {}: complete", id);
    Ok(Json(a002_warehouse_transfer::service::complete(&id).await?))
}

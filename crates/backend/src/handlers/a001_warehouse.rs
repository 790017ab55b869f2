use axum::{extract::Path, Json};
use contracts::domain::a001_warehouse::aggregate::{Warehouse, WarehouseDto};

use crate::domain::a001_warehouse;
use crate::shared::error::ServiceResult;

/// GET /api/warehouses
pub async fn list_all() -> ServiceResult<Json<Vec<Warehouse>>> {
    Ok(Json(a001_warehouse::service::list_all().await?))
}

/// GET /api/warehouses/:id
pub async fn get_by_id(Path(id): Path<i64>) -> ServiceResult<Json<Warehouse>> {
    Ok(Json(a001_warehouse::service::get_by_id(id).await?))
}

/// POST /api/warehouses
pub async fn create(Json(dto): Json<WarehouseDto>) -> ServiceResult<Json<Warehouse>> {
    Ok(Json(a001_warehouse::service::create(dto).await?))
}

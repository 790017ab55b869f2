use super::repository;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a001_warehouse::aggregate::{Warehouse, WarehouseDto};

pub async fn list_all() -> ServiceResult<Vec<Warehouse>> {
    Ok(repository::list_all().await?)
}

pub async fn get_by_id(id: i64) -> ServiceResult<Warehouse> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("warehouse", &id.to_string()))
}

pub async fn exists(id: i64) -> ServiceResult<bool> {
    Ok(repository::get_by_id(id).await?.is_some())
}

/// Создание склада; код уникален
pub async fn create(dto: WarehouseDto) -> ServiceResult<Warehouse> {
    dto.validate().map_err(ServiceError::Validation)?;
    if repository::get_by_code(dto.code.trim()).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "Warehouse code {} already exists",
            dto.code
        )));
    }
    let id = repository::insert(&dto).await?;
    tracing::info!("warehouse {} '{}' created", id, dto.name);
    get_by_id(id).await
}

/// Демонстрационные склады; возвращает их ID в порядке вставки
pub async fn insert_test_data() -> ServiceResult<Vec<i64>> {
    let data = [
        ("HN", "Kho Hà Nội", "Số 12 Phạm Hùng, Nam Từ Liêm, Hà Nội"),
        ("DN", "Kho Đà Nẵng", "KCN Hòa Khánh, Liên Chiểu, Đà Nẵng"),
        ("HCM", "Kho TP. Hồ Chí Minh", "KCN Tân Bình, TP. Hồ Chí Minh"),
        ("CT", "Kho Cần Thơ", "KCN Trà Nóc, Bình Thủy, Cần Thơ"),
    ];
    let mut ids = Vec::with_capacity(data.len());
    for (code, name, address) in data {
        let warehouse = create(WarehouseDto {
            code: code.into(),
            name: name.into(),
            address: Some(address.into()),
        })
        .await?;
        ids.push(warehouse.id);
    }
    Ok(ids)
}

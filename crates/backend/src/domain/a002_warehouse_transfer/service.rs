use super::repository;
use crate::domain::a001_warehouse;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a002_warehouse_transfer::aggregate::{
    CreateTransferDto, PlanningRequest, TransferListQuery, WarehouseTransfer,
};
use contracts::domain::a002_warehouse_transfer::status::TransferStatus;
use contracts::domain::a002_warehouse_transfer::workflow;
use contracts::domain::common::TransitionError;

// ============================================================================
// Queries
// ============================================================================

pub async fn list(query: TransferListQuery) -> ServiceResult<Vec<WarehouseTransfer>> {
    Ok(repository::list_by_warehouse(query.warehouse_id, query.direction).await?)
}

pub async fn get_by_id(id: &str) -> ServiceResult<WarehouseTransfer> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("transfer", id))
}

// ============================================================================
// Transitions
// ============================================================================

/// Назначить склад-исполнитель и вычислить новый статус.
///
/// `warehouse_known` - есть ли склад в справочнике (проверяется вызывающим).
pub fn apply_plan(
    transfer: &mut WarehouseTransfer,
    warehouse_id: i64,
    warehouse_known: bool,
) -> ServiceResult<TransferStatus> {
    transfer
        .validate_planning(warehouse_id)
        .map_err(ServiceError::Validation)?;
    if !warehouse_known {
        return Err(ServiceError::Validation(format!(
            "Warehouse {} does not exist",
            warehouse_id
        )));
    }
    let next = workflow::plan_target(&transfer.status)?;
    transfer.fulfilling_warehouse_id = Some(warehouse_id);
    transfer.apply_status(next);
    Ok(next)
}

/// Перевести статус по функции перехода (approve/cancel/complete)
pub fn apply_transition(
    transfer: &mut WarehouseTransfer,
    target: fn(&str) -> Result<TransferStatus, TransitionError>,
) -> ServiceResult<TransferStatus> {
    let next = target(&transfer.status)?;
    transfer.apply_status(next);
    Ok(next)
}

async fn persist(transfer: &WarehouseTransfer, expected_version: i32) -> ServiceResult<()> {
    if repository::update_status(transfer, expected_version).await? {
        Ok(())
    } else {
        Err(ServiceError::Conflict(format!(
            "Transfer {} was modified concurrently, reload and retry",
            transfer.request_code
        )))
    }
}

fn log_rejection<T>(id: &str, action: &str, result: &ServiceResult<T>) {
    if let Err(e) = result {
        tracing::warn!("transfer {}: {} rejected: {}", id, action, e);
    }
}

/// POST /api/transfers/{id}/plan
pub async fn plan(id: &str, request: PlanningRequest) -> ServiceResult<WarehouseTransfer> {
    let mut transfer = get_by_id(id).await?;
    let expected_version = transfer.metadata.version;
    let known = request.warehouse_id > 0 && a001_warehouse::service::exists(request.warehouse_id).await?;

    let result = apply_plan(&mut transfer, request.warehouse_id, known);
    log_rejection(id, "plan", &result);
    let next = result?;

    persist(&transfer, expected_version).await?;
    tracing::info!(
        "transfer {} planned: fulfilling warehouse {}, status {}",
        transfer.request_code,
        request.warehouse_id,
        next
    );
    Ok(transfer)
}

async fn transition(
    id: &str,
    action: &str,
    target: fn(&str) -> Result<TransferStatus, TransitionError>,
) -> ServiceResult<WarehouseTransfer> {
    let mut transfer = get_by_id(id).await?;
    let expected_version = transfer.metadata.version;
    let from = transfer.status.clone();

    let result = apply_transition(&mut transfer, target);
    log_rejection(id, action, &result);
    let next = result?;

    persist(&transfer, expected_version).await?;
    tracing::info!(
        "transfer {}: {} {} -> {}",
        transfer.request_code,
        action,
        from,
        next
    );
    Ok(transfer)
}

pub async fn approve(id: &str) -> ServiceResult<WarehouseTransfer> {
    transition(id, "approve", workflow::approve_target).await
}

pub async fn cancel(id: &str) -> ServiceResult<WarehouseTransfer> {
    transition(id, "cancel", workflow::cancel_target).await
}

pub async fn complete(id: &str) -> ServiceResult<WarehouseTransfer> {
    transition(id, "complete", workflow::complete_target).await
}

// ============================================================================
// Creation
// ============================================================================

/// Создание заявки на перемещение (процесс заявок, тестовые данные)
pub async fn create(dto: CreateTransferDto) -> ServiceResult<WarehouseTransfer> {
    let transfer = WarehouseTransfer::new_for_insert(dto);
    transfer.validate().map_err(ServiceError::Validation)?;

    for warehouse_id in [transfer.source_warehouse_id, transfer.destination_warehouse_id] {
        if !a001_warehouse::service::exists(warehouse_id).await? {
            return Err(ServiceError::Validation(format!(
                "Warehouse {} does not exist",
                warehouse_id
            )));
        }
    }
    if repository::get_by_code(&transfer.request_code).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "Request code {} already exists",
            transfer.request_code
        )));
    }

    repository::insert(&transfer).await?;
    tracing::info!("transfer {} created", transfer.request_code);
    Ok(transfer)
}

/// Демонстрационные перемещения между складами `warehouses`
pub async fn insert_test_data(warehouses: &[i64]) -> ServiceResult<()> {
    use contracts::domain::a002_warehouse_transfer::aggregate::{ProductDetails, TransferProduct};

    if warehouses.len() < 3 {
        return Ok(());
    }
    let (hn, dn, hcm) = (warehouses[0], warehouses[1], warehouses[2]);

    let product = |id: i64, name: &str, quantity: f64, unit: &str| TransferProduct {
        product_id: id,
        quantity,
        unit: unit.into(),
        notes: None,
        product_details: Some(ProductDetails {
            name: name.into(),
            code: format!("SP-{:03}", id),
            description: None,
            available_stock: Some(quantity * 4.0),
        }),
    };

    let data = vec![
        (hn, dn, "TR-0001", vec![product(1, "Nước suối 500ml", 120.0, "thùng")], None),
        (
            hn,
            hcm,
            "TR-0002",
            vec![
                product(2, "Mì gói Hảo Hảo", 80.0, "thùng"),
                product(3, "Dầu ăn 1L", 40.0, "chai"),
            ],
            Some("Giao trước ngày 20"),
        ),
        (dn, hn, "TR-0003", vec![product(4, "Gạo ST25 5kg", 60.0, "bao")], None),
        (hcm, hn, "TR-0004", Vec::new(), Some("Chờ bổ sung danh sách hàng")),
        (hcm, dn, "TR-0005", vec![product(5, "Sữa tươi 1L", 200.0, "hộp")], None),
    ];

    for (source, destination, code, products, notes) in data {
        create(CreateTransferDto {
            request_code: Some(code.into()),
            source_warehouse_id: source,
            destination_warehouse_id: destination,
            products,
            notes: notes.map(Into::into),
        })
        .await?;
    }

    // разные статусы для наглядности списка
    if let Some(t) = repository::get_by_code("TR-0003").await? {
        plan(&t.to_string_id(), PlanningRequest { warehouse_id: hcm }).await?;
    }
    if let Some(t) = repository::get_by_code("TR-0005").await? {
        approve(&t.to_string_id()).await?;
    }
    Ok(())
}

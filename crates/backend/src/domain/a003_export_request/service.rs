use super::repository;
use crate::domain::{a001_warehouse, a004_export_receipt};
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use contracts::domain::a003_export_request::aggregate::{
    CreateExportRequestDto, ExportRequest, ExportRequestLine,
};
use contracts::domain::a003_export_request::status::ExportRequestStatus;
use contracts::domain::a003_export_request::workflow;
use contracts::domain::a004_export_receipt::aggregate::ExportReceipt;
use contracts::domain::common::TransitionError;

pub async fn list_all() -> ServiceResult<Vec<ExportRequest>> {
    Ok(repository::list_all().await?)
}

pub async fn get_by_id(id: &str) -> ServiceResult<ExportRequest> {
    let uuid = parse_uuid(id)?;
    repository::get_by_id(uuid)
        .await?
        .ok_or_else(|| ServiceError::not_found("export request", id))
}

pub async fn create(dto: CreateExportRequestDto) -> ServiceResult<ExportRequest> {
    let request = ExportRequest::new_for_insert(dto);
    request.validate().map_err(ServiceError::Validation)?;
    if !a001_warehouse::service::exists(request.warehouse_id).await? {
        return Err(ServiceError::Validation(format!(
            "Warehouse {} does not exist",
            request.warehouse_id
        )));
    }
    if repository::get_by_code(&request.request_code).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "Request code {} already exists",
            request.request_code
        )));
    }
    repository::insert(&request).await?;
    tracing::info!("export request {} created", request.request_code);
    Ok(request)
}

async fn transition(
    id: &str,
    action: &str,
    target: fn(&str) -> Result<ExportRequestStatus, TransitionError>,
) -> ServiceResult<ExportRequest> {
    let mut request = get_by_id(id).await?;
    let expected_version = request.metadata.version;
    let from = request.status.clone();

    let next = target(&request.status).map_err(|e| {
        tracing::warn!("export request {}: {} rejected: {}", id, action, e);
        ServiceError::from(e)
    })?;
    request.apply_status(next);

    if !repository::update_status(&request, expected_version).await? {
        return Err(ServiceError::Conflict(format!(
            "Export request {} was modified concurrently",
            request.request_code
        )));
    }
    tracing::info!(
        "export request {}: {} {} -> {}",
        request.request_code,
        action,
        from,
        next
    );
    Ok(request)
}

pub async fn process(id: &str) -> ServiceResult<ExportRequest> {
    transition(id, "process", workflow::process_target).await
}

pub async fn approve(id: &str) -> ServiceResult<ExportRequest> {
    transition(id, "approve", workflow::approve_target).await
}

pub async fn cancel(id: &str) -> ServiceResult<ExportRequest> {
    transition(id, "cancel", workflow::cancel_target).await
}

/// Проверка перед созданием расходного документа
pub fn ensure_receipt_allowed(request: &ExportRequest) -> ServiceResult<()> {
    if !workflow::can_create_export_from_approved_request(&request.status) {
        return Err(TransitionError::new(request.status.clone(), "create receipt").into());
    }
    if request.lines.is_empty() {
        return Err(ServiceError::Validation(format!(
            "Export request {} has no lines",
            request.request_code
        )));
    }
    Ok(())
}

/// POST /api/export-requests/{id}/receipt
pub async fn create_receipt(id: &str) -> ServiceResult<ExportReceipt> {
    let request = get_by_id(id).await?;
    ensure_receipt_allowed(&request).map_err(|e| {
        tracing::warn!("export request {}: receipt rejected: {}", id, e);
        e
    })?;
    a004_export_receipt::service::create_from_request(&request).await
}

pub async fn insert_test_data(warehouses: &[i64]) -> ServiceResult<()> {
    let Some(&warehouse_id) = warehouses.first() else {
        return Ok(());
    };
    let line = |product_id: i64, quantity: f64, unit: &str| ExportRequestLine {
        product_id,
        quantity,
        unit: unit.into(),
    };
    let data = vec![
        ("YC-0001", "Đại lý Minh Anh", vec![line(1, 30.0, "thùng"), line(3, 12.0, "chai")]),
        ("YC-0002", "Đại lý Phú Thịnh", vec![line(2, 25.0, "thùng")]),
        ("YC-0003", "Cửa hàng Hoa Mai", vec![line(4, 10.0, "bao")]),
    ];
    for (code, agency, lines) in data {
        create(CreateExportRequestDto {
            request_code: Some(code.into()),
            agency_name: agency.into(),
            warehouse_id,
            lines,
            notes: None,
        })
        .await?;
    }
    if let Some(r) = repository::get_by_code("YC-0002").await? {
        approve(&r.to_string_id()).await?;
    }
    if let Some(r) = repository::get_by_code("YC-0003").await? {
        process(&r.to_string_id()).await?;
    }
    Ok(())
}

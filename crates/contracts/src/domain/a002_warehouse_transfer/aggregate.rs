use super::status::{TransferDirection, TransferStatus};
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор перемещения (назначается сервером).
///
/// Непрозрачная строка: клиент только сравнивает и передаёт её обратно.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(String);

impl TransferId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AggregateId for TransferId {
    fn as_string(&self) -> String {
        self.0.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty transfer id".into());
        }
        Ok(TransferId::new(s))
    }
}

// ============================================================================
// Lines
// ============================================================================

/// Снимок карточки товара на момент создания заявки (может отсутствовать)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available_stock: Option<f64>,
}

/// Строка перемещения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferProduct {
    pub product_id: i64,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub product_details: Option<ProductDetails>,
}

impl TransferProduct {
    /// Наименование для UI; без снимка карточки показываем только ID
    pub fn display_name(&self) -> String {
        match &self.product_details {
            Some(details) if !details.name.trim().is_empty() => details.name.clone(),
            _ => format!("#{}", self.product_id),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Заявка на перемещение товара со склада-отправителя на склад-получатель
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseTransfer {
    pub id: TransferId,

    #[serde(alias = "warehouseTransferCode")]
    pub request_code: String,

    pub source_warehouse_id: i64,
    pub destination_warehouse_id: i64,

    /// Склад-исполнитель, назначается при планировании
    #[serde(default)]
    pub fulfilling_warehouse_id: Option<i64>,

    #[serde(default)]
    pub products: Vec<TransferProduct>,

    /// Дата создания заявки, после создания не меняется
    pub request_date: DateTime<Utc>,

    /// Сырой статус; сравнение всегда без учёта регистра
    pub status: String,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl WarehouseTransfer {
    /// Создать новую заявку для вставки в БД (статус pending)
    pub fn new_for_insert(dto: CreateTransferDto) -> Self {
        let id = TransferId::new_v4();
        let request_code = dto
            .request_code
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("TR-{}", &id.as_string()[..8]));
        Self {
            id,
            request_code,
            source_warehouse_id: dto.source_warehouse_id,
            destination_warehouse_id: dto.destination_warehouse_id,
            fulfilling_warehouse_id: None,
            products: dto.products,
            request_date: Utc::now(),
            status: TransferStatus::Pending.as_str().to_string(),
            notes: dto.notes,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn status_kind(&self) -> Option<TransferStatus> {
        TransferStatus::parse(&self.status)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn total_quantity(&self) -> f64 {
        self.products.iter().map(|p| p.quantity).sum()
    }

    /// Относится ли перемещение к складу в заданном направлении
    pub fn belongs_to(&self, warehouse_id: i64, direction: TransferDirection) -> bool {
        match direction {
            TransferDirection::Outgoing => self.source_warehouse_id == warehouse_id,
            TransferDirection::Incoming => self.destination_warehouse_id == warehouse_id,
        }
    }

    /// Склад «на другой стороне» для выбранного направления
    pub fn counterpart_id(&self, direction: TransferDirection) -> i64 {
        match direction {
            TransferDirection::Outgoing => self.destination_warehouse_id,
            TransferDirection::Incoming => self.source_warehouse_id,
        }
    }

    /// Установить новый статус (вызывается только после проверки перехода)
    pub fn apply_status(&mut self, status: TransferStatus) {
        self.status = status.as_str().to_string();
        self.before_write();
    }

    /// Проверка выбранного склада-исполнителя
    pub fn validate_planning(&self, warehouse_id: i64) -> Result<(), String> {
        if warehouse_id <= 0 {
            return Err("Không hợp lệ: kho thực hiện chưa được chọn".into());
        }
        if warehouse_id == self.destination_warehouse_id {
            return Err("Kho thực hiện không được trùng với kho nhận".into());
        }
        Ok(())
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.request_code.trim().is_empty() {
            return Err("Mã yêu cầu không được để trống".into());
        }
        if self.source_warehouse_id == self.destination_warehouse_id {
            return Err("Kho xuất và kho nhận phải khác nhau".into());
        }
        if let Some(line) = self.products.iter().find(|p| p.quantity <= 0.0) {
            return Err(format!(
                "Số lượng của sản phẩm {} phải lớn hơn 0",
                line.product_id
            ));
        }
        Ok(())
    }
}

impl AggregateRoot for WarehouseTransfer {
    type Id = TransferId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }

    fn code(&self) -> &str {
        &self.request_code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Тело запроса планирования: выбранный склад-исполнитель
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningRequest {
    pub warehouse_id: i64,
}

/// DTO создания заявки (внешний процесс заявок и тестовые данные)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferDto {
    #[serde(default)]
    pub request_code: Option<String>,
    pub source_warehouse_id: i64,
    pub destination_warehouse_id: i64,
    #[serde(default)]
    pub products: Vec<TransferProduct>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Параметры запроса списка: `?warehouseId=1&direction=outgoing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferListQuery {
    pub warehouse_id: i64,
    pub direction: TransferDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(products: Vec<TransferProduct>) -> WarehouseTransfer {
        WarehouseTransfer::new_for_insert(CreateTransferDto {
            request_code: Some("TR-001".into()),
            source_warehouse_id: 1,
            destination_warehouse_id: 2,
            products,
            notes: None,
        })
    }

    #[test]
    fn test_new_transfer_is_pending() {
        let t = transfer(vec![]);
        assert_eq!(t.status, "pending");
        assert_eq!(t.status_kind(), Some(TransferStatus::Pending));
        assert_eq!(t.fulfilling_warehouse_id, None);
    }

    #[test]
    fn test_empty_products_are_tolerated() {
        let t = transfer(vec![]);
        assert_eq!(t.product_count(), 0);
        assert_eq!(t.total_quantity(), 0.0);
        assert!(t.products.iter().map(|p| p.display_name()).next().is_none());
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_generated_code_when_missing() {
        let t = WarehouseTransfer::new_for_insert(CreateTransferDto {
            source_warehouse_id: 1,
            destination_warehouse_id: 2,
            ..Default::default()
        });
        assert!(t.request_code.starts_with("TR-"));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut line = TransferProduct {
            product_id: 15,
            quantity: 3.0,
            unit: "thùng".into(),
            notes: None,
            product_details: None,
        };
        assert_eq!(line.display_name(), "#15");
        line.product_details = Some(ProductDetails {
            name: "Nước suối".into(),
            code: "NS-01".into(),
            description: None,
            available_stock: Some(40.0),
        });
        assert_eq!(line.display_name(), "Nước suối");
    }

    #[test]
    fn test_direction_membership() {
        let t = transfer(vec![]);
        assert!(t.belongs_to(1, TransferDirection::Outgoing));
        assert!(!t.belongs_to(1, TransferDirection::Incoming));
        assert!(t.belongs_to(2, TransferDirection::Incoming));
        assert_eq!(t.counterpart_id(TransferDirection::Outgoing), 2);
        assert_eq!(t.counterpart_id(TransferDirection::Incoming), 1);
    }

    #[test]
    fn test_validate_rejects_same_warehouses_and_bad_quantity() {
        let mut t = transfer(vec![TransferProduct {
            product_id: 1,
            quantity: 0.0,
            unit: String::new(),
            notes: None,
            product_details: None,
        }]);
        assert!(t.validate().is_err());
        t.products.clear();
        t.destination_warehouse_id = 1;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_planning() {
        let t = transfer(vec![]);
        assert!(t.validate_planning(0).is_err());
        assert!(t.validate_planning(2).is_err());
        assert!(t.validate_planning(7).is_ok());
    }

    #[test]
    fn test_apply_status_bumps_version() {
        let mut t = transfer(vec![]);
        let before = t.metadata.version;
        t.apply_status(TransferStatus::Planned);
        assert_eq!(t.status, "planned");
        assert_eq!(t.metadata.version, before + 1);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::json!({
            "id": "3f1c2a9e-8f53-4c4a-9b1e-6a2d9d0c7b10",
            "warehouseTransferCode": "TR-9",
            "sourceWarehouseId": 3,
            "destinationWarehouseId": 4,
            "requestDate": "2025-01-02T03:04:05Z",
            "status": "PLANNED"
        });
        let t: WarehouseTransfer = serde_json::from_value(json).unwrap();
        assert_eq!(t.request_code, "TR-9");
        assert!(t.products.is_empty());
        assert_eq!(t.status_kind(), Some(TransferStatus::Planned));

        let body = serde_json::to_value(PlanningRequest { warehouse_id: 7 }).unwrap();
        assert_eq!(body, serde_json::json!({ "warehouseId": 7 }));
    }

    #[test]
    fn test_server_id_is_kept_verbatim() {
        let json = serde_json::json!({
            "id": "WT-2025-000123",
            "requestCode": "TR-10",
            "sourceWarehouseId": 1,
            "destinationWarehouseId": 2,
            "requestDate": "2025-01-02T03:04:05Z",
            "status": "pending"
        });
        let t: WarehouseTransfer = serde_json::from_value(json).unwrap();
        assert_eq!(t.to_string_id(), "WT-2025-000123");
        assert_eq!(serde_json::to_value(&t.id).unwrap(), serde_json::json!("WT-2025-000123"));

        assert_eq!(TransferId::from_string(" 42 ").unwrap().as_str(), "42");
        assert!(TransferId::from_string("  ").is_err());
    }
}

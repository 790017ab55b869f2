use super::status::ExportRequestStatus;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::shared::list_query::Searchable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID заявки на отгрузку
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportRequestId(pub Uuid);

impl ExportRequestId {
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

impl AggregateId for ExportRequestId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ExportRequestId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Строка заявки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequestLine {
    pub product_id: i64,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

/// Заявка агента на отгрузку со склада
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub id: ExportRequestId,
    pub request_code: String,
    /// Агент (дилер), оформивший заявку
    pub agency_name: String,
    pub warehouse_id: i64,
    #[serde(default)]
    pub lines: Vec<ExportRequestLine>,
    pub request_date: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl ExportRequest {
    pub fn new_for_insert(dto: CreateExportRequestDto) -> Self {
        let id = ExportRequestId::new_v4();
        let request_code = dto
            .request_code
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("YC-{}", &id.as_string()[..8]));
        Self {
            id,
            request_code,
            agency_name: dto.agency_name,
            warehouse_id: dto.warehouse_id,
            lines: dto.lines,
            request_date: Utc::now(),
            status: ExportRequestStatus::Requested.as_str().to_string(),
            notes: dto.notes,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn status_kind(&self) -> Option<ExportRequestStatus> {
        ExportRequestStatus::parse(&self.status)
    }

    pub fn apply_status(&mut self, status: ExportRequestStatus) {
        self.status = status.as_str().to_string();
        self.before_write();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.request_code.trim().is_empty() {
            return Err("Mã yêu cầu không được để trống".into());
        }
        if self.agency_name.trim().is_empty() {
            return Err("Tên đại lý không được để trống".into());
        }
        if self.lines.iter().any(|l| l.quantity <= 0.0) {
            return Err("Số lượng phải lớn hơn 0".into());
        }
        Ok(())
    }
}

impl AggregateRoot for ExportRequest {
    type Id = ExportRequestId;

    fn id(&self) -> Self::Id {
        self.id
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

impl Searchable for ExportRequest {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.request_code.as_str(), self.agency_name.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes.as_str());
        }
        fields
    }

    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExportRequestDto {
    #[serde(default)]
    pub request_code: Option<String>,
    pub agency_name: String,
    pub warehouse_id: i64,
    #[serde(default)]
    pub lines: Vec<ExportRequestLine>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_requested() {
        let r = ExportRequest::new_for_insert(CreateExportRequestDto {
            agency_name: "Đại lý Minh Anh".into(),
            warehouse_id: 1,
            lines: vec![ExportRequestLine {
                product_id: 3,
                quantity: 12.0,
                unit: "thùng".into(),
            }],
            ..Default::default()
        });
        assert_eq!(r.status_kind(), Some(ExportRequestStatus::Requested));
        assert!(r.request_code.starts_with("YC-"));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_agency() {
        let r = ExportRequest::new_for_insert(CreateExportRequestDto {
            agency_name: " ".into(),
            warehouse_id: 1,
            ..Default::default()
        });
        assert!(r.validate().is_err());
    }
}

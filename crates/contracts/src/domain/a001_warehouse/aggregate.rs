use serde::{Deserialize, Serialize};

/// Склад. Ключ числовой: на него ссылаются перемещения и заявки.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// DTO для создания склада
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseDto {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl WarehouseDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Mã kho không được để trống".into());
        }
        if self.name.trim().is_empty() {
            return Err("Tên kho không được để trống".into());
        }
        Ok(())
    }
}

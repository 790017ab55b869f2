use anyhow::Context;
use chrono::Utc;
use contracts::domain::a004_export_receipt::aggregate::{ExportReceipt, ExportReceiptId, ReceiptLine};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_export_receipt")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub receipt_code: String,
    pub export_request_id: String,
    pub request_code: String,
    pub warehouse_id: i64,
    pub status: String,
    /// Строки документа, JSON-массив `ReceiptLine`
    pub lines_json: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ExportReceipt {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> anyhow::Result<Self> {
        let id = ExportReceiptId::from_string(&m.id)
            .map_err(|e| anyhow::anyhow!("export receipt row {:?}: {}", m.id, e))?;
        let lines: Vec<ReceiptLine> = match m.lines_json.as_deref() {
            Some(s) if !s.trim().is_empty() => serde_json::from_str(s)
                .with_context(|| format!("export receipt {}: cannot parse lines_json", m.id))?,
            _ => Vec::new(),
        };
        let created_at = m.created_at.unwrap_or_else(Utc::now);

        Ok(ExportReceipt {
            id,
            receipt_code: m.receipt_code,
            export_request_id: m.export_request_id,
            request_code: m.request_code,
            warehouse_id: m.warehouse_id,
            created_at,
            status: m.status,
            lines,
            notes: m.notes,
            metadata: EntityMetadata {
                created_at,
                updated_at: m.updated_at.unwrap_or(created_at),
                version: m.version,
            },
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ExportReceipt>> {
    let items = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(ExportReceipt::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ExportReceipt>> {
    Entity::find_by_id(id.to_string())
        .one(conn())
        .await?
        .map(ExportReceipt::try_from)
        .transpose()
}

pub async fn get_by_request_id(export_request_id: &str) -> anyhow::Result<Option<ExportReceipt>> {
    let result = Entity::find()
        .filter(Column::ExportRequestId.eq(export_request_id))
        .one(conn())
        .await?;
    result.map(ExportReceipt::try_from).transpose()
}

/// Документ, содержащий строку `line_id`
pub async fn find_by_line_id(line_id: Uuid) -> anyhow::Result<Option<ExportReceipt>> {
    let candidates = Entity::find()
        .filter(Column::LinesJson.contains(&line_id.to_string()))
        .all(conn())
        .await?;
    for model in candidates {
        let receipt = ExportReceipt::try_from(model)?;
        if receipt.line(line_id).is_some() {
            return Ok(Some(receipt));
        }
    }
    Ok(None)
}

pub async fn insert(aggregate: &ExportReceipt) -> anyhow::Result<Uuid> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        receipt_code: Set(aggregate.receipt_code.clone()),
        export_request_id: Set(aggregate.export_request_id.clone()),
        request_code: Set(aggregate.request_code.clone()),
        warehouse_id: Set(aggregate.warehouse_id),
        status: Set(aggregate.status.clone()),
        lines_json: Set(Some(serde_json::to_string(&aggregate.lines)?)),
        notes: Set(aggregate.notes.clone()),
        created_at: Set(Some(aggregate.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(aggregate.id.value())
}

/// Сохранить строки и статус при неизменной версии
pub async fn update_lines(aggregate: &ExportReceipt, expected_version: i32) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(aggregate.status.clone()))
        .col_expr(
            Column::LinesJson,
            Expr::value(serde_json::to_string(&aggregate.lines)?),
        )
        .col_expr(Column::UpdatedAt, Expr::value(aggregate.metadata.updated_at))
        .col_expr(Column::Version, Expr::value(aggregate.metadata.version))
        .filter(Column::Id.eq(aggregate.id.as_string()))
        .filter(Column::Version.eq(expected_version))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(lines_json: &str) -> Model {
        Model {
            id: "6a2d9d0c-7b10-4c4a-9b1e-3f1c2a9e8f53".into(),
            receipt_code: "PX-0001".into(),
            export_request_id: "3f1c2a9e-8f53-4c4a-9b1e-6a2d9d0c7b10".into(),
            request_code: "YC-0001".into(),
            warehouse_id: 1,
            status: "pending".into(),
            lines_json: Some(lines_json.into()),
            notes: None,
            created_at: None,
            updated_at: None,
            version: 2,
        }
    }

    #[test]
    fn test_corrupt_lines_json_is_an_error() {
        let err = ExportReceipt::try_from(model("[{\"id\":")).unwrap_err();
        assert!(err.to_string().contains("lines_json"));

        let empty = ExportReceipt::try_from(model("[]")).unwrap();
        assert!(empty.lines.is_empty());
        assert_eq!(empty.metadata.updated_at, empty.created_at);
    }
}

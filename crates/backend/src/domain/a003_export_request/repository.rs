use anyhow::Context;
use chrono::Utc;
use contracts::domain::a003_export_request::aggregate::{
    ExportRequest, ExportRequestId, ExportRequestLine,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_export_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub request_code: String,
    pub agency_name: String,
    pub warehouse_id: i64,
    pub lines_json: Option<String>,
    pub request_date: chrono::DateTime<chrono::Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ExportRequest {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> anyhow::Result<Self> {
        let id = ExportRequestId::from_string(&m.id)
            .map_err(|e| anyhow::anyhow!("export request row {:?}: {}", m.id, e))?;
        let lines: Vec<ExportRequestLine> = match m.lines_json.as_deref() {
            Some(s) if !s.trim().is_empty() => serde_json::from_str(s)
                .with_context(|| format!("export request {}: cannot parse lines_json", m.id))?,
            _ => Vec::new(),
        };

        Ok(ExportRequest {
            id,
            request_code: m.request_code,
            agency_name: m.agency_name,
            warehouse_id: m.warehouse_id,
            lines,
            request_date: m.request_date,
            status: m.status,
            notes: m.notes,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or(m.request_date),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
                version: m.version,
            },
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ExportRequest>> {
    let items = Entity::find()
        .order_by_desc(Column::RequestDate)
        .all(conn())
        .await?
        .into_iter()
        .map(ExportRequest::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ExportRequest>> {
    Entity::find_by_id(id.to_string())
        .one(conn())
        .await?
        .map(ExportRequest::try_from)
        .transpose()
}

pub async fn get_by_code(code: &str) -> anyhow::Result<Option<ExportRequest>> {
    let result = Entity::find()
        .filter(Column::RequestCode.eq(code))
        .one(conn())
        .await?;
    result.map(ExportRequest::try_from).transpose()
}

pub async fn insert(aggregate: &ExportRequest) -> anyhow::Result<Uuid> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        request_code: Set(aggregate.request_code.clone()),
        agency_name: Set(aggregate.agency_name.clone()),
        warehouse_id: Set(aggregate.warehouse_id),
        lines_json: Set(Some(serde_json::to_string(&aggregate.lines)?)),
        request_date: Set(aggregate.request_date),
        status: Set(aggregate.status.clone()),
        notes: Set(aggregate.notes.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(aggregate.id.value())
}

/// Обновить статус при неизменной версии; false - запись изменена параллельно
pub async fn update_status(aggregate: &ExportRequest, expected_version: i32) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(aggregate.status.clone()))
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

    fn model(id: &str, lines_json: Option<&str>) -> Model {
        Model {
            id: id.into(),
            request_code: "YC-0001".into(),
            agency_name: "Đại lý Bình Minh".into(),
            warehouse_id: 1,
            lines_json: lines_json.map(String::from),
            request_date: "2025-03-01T08:00:00Z".parse().unwrap(),
            status: "pending".into(),
            notes: None,
            created_at: None,
            updated_at: None,
            version: 1,
        }
    }

    #[test]
    fn test_bad_row_id_is_an_error() {
        assert!(ExportRequest::try_from(model("not-a-uuid", None)).is_err());
        let ok = ExportRequest::try_from(model("3f1c2a9e-8f53-4c4a-9b1e-6a2d9d0c7b10", None)).unwrap();
        assert!(ok.lines.is_empty());
    }

    #[test]
    fn test_corrupt_lines_json_is_an_error() {
        let err = ExportRequest::try_from(model("3f1c2a9e-8f53-4c4a-9b1e-6a2d9d0c7b10", Some("{")))
            .unwrap_err();
        assert!(err.to_string().contains("lines_json"));
    }
}

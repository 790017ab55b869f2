use anyhow::Context;
use chrono::Utc;
use contracts::domain::a002_warehouse_transfer::aggregate::{
    TransferId, TransferProduct, WarehouseTransfer,
};
use contracts::domain::a002_warehouse_transfer::status::TransferDirection;
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_warehouse_transfer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub request_code: String,
    pub source_warehouse_id: i64,
    pub destination_warehouse_id: i64,
    pub fulfilling_warehouse_id: Option<i64>,
    /// Строки перемещения, JSON-массив `TransferProduct`
    pub products_json: Option<String>,
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

fn parse_products(id: &str, json: Option<&str>) -> anyhow::Result<Vec<TransferProduct>> {
    match json {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s)
            .with_context(|| format!("transfer {}: cannot parse products_json", id)),
    }
}

impl TryFrom<Model> for WarehouseTransfer {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> anyhow::Result<Self> {
        let id = TransferId::from_string(&m.id)
            .map_err(|e| anyhow::anyhow!("transfer row {:?}: {}", m.id, e))?;
        let products = parse_products(&m.id, m.products_json.as_deref())?;
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or(m.request_date),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };

        Ok(WarehouseTransfer {
            id,
            request_code: m.request_code,
            source_warehouse_id: m.source_warehouse_id,
            destination_warehouse_id: m.destination_warehouse_id,
            fulfilling_warehouse_id: m.fulfilling_warehouse_id,
            products,
            request_date: m.request_date,
            status: m.status,
            notes: m.notes,
            metadata,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Перемещения склада в заданном направлении, новые сверху
pub async fn list_by_warehouse(
    warehouse_id: i64,
    direction: TransferDirection,
) -> anyhow::Result<Vec<WarehouseTransfer>> {
    let column = match direction {
        TransferDirection::Outgoing => Column::SourceWarehouseId,
        TransferDirection::Incoming => Column::DestinationWarehouseId,
    };
    let items = Entity::find()
        .filter(column.eq(warehouse_id))
        .order_by_desc(Column::RequestDate)
        .all(conn())
        .await?
        .into_iter()
        .map(WarehouseTransfer::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(items)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<WarehouseTransfer>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    result.map(WarehouseTransfer::try_from).transpose()
}

pub async fn get_by_code(code: &str) -> anyhow::Result<Option<WarehouseTransfer>> {
    let result = Entity::find()
        .filter(Column::RequestCode.eq(code))
        .one(conn())
        .await?;
    result.map(WarehouseTransfer::try_from).transpose()
}

pub async fn insert(aggregate: &WarehouseTransfer) -> anyhow::Result<TransferId> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        request_code: Set(aggregate.request_code.clone()),
        source_warehouse_id: Set(aggregate.source_warehouse_id),
        destination_warehouse_id: Set(aggregate.destination_warehouse_id),
        fulfilling_warehouse_id: Set(aggregate.fulfilling_warehouse_id),
        products_json: Set(Some(serde_json::to_string(&aggregate.products)?)),
        request_date: Set(aggregate.request_date),
        status: Set(aggregate.status.clone()),
        notes: Set(aggregate.notes.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(aggregate.id.clone())
}

/// Сохранить статус и склад-исполнитель, если версия в БД не изменилась.
///
/// `expected_version` - версия, с которой агрегат был прочитан. Возвращает
/// false, когда запись успели изменить параллельно.
pub async fn update_status(
    aggregate: &WarehouseTransfer,
    expected_version: i32,
) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(aggregate.status.clone()))
        .col_expr(
            Column::FulfillingWarehouseId,
            Expr::value(aggregate.fulfilling_warehouse_id),
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

    fn model(id: &str, products_json: Option<&str>) -> Model {
        let date = "2025-03-01T08:00:00Z".parse().unwrap();
        Model {
            id: id.into(),
            request_code: "TR-0001".into(),
            source_warehouse_id: 1,
            destination_warehouse_id: 2,
            fulfilling_warehouse_id: None,
            products_json: products_json.map(String::from),
            request_date: date,
            status: "PENDING".into(),
            notes: None,
            created_at: None,
            updated_at: Some(date),
            version: 3,
        }
    }

    #[test]
    fn test_row_keeps_server_id() {
        let t = WarehouseTransfer::try_from(model("WT-legacy-7", None)).unwrap();
        assert_eq!(t.to_string_id(), "WT-legacy-7");
        assert!(t.products.is_empty());
        assert_eq!(t.metadata.version, 3);
        assert_eq!(t.metadata.created_at, t.request_date);
    }

    #[test]
    fn test_products_json_is_decoded() {
        let json = r#"[{"productId":5,"quantity":2.5,"unit":"kg"}]"#;
        let t = WarehouseTransfer::try_from(model("a", Some(json))).unwrap();
        assert_eq!(t.products.len(), 1);
        assert_eq!(t.products[0].product_id, 5);
        assert_eq!(t.total_quantity(), 2.5);

        let blank = WarehouseTransfer::try_from(model("b", Some("  "))).unwrap();
        assert!(blank.products.is_empty());
    }

    #[test]
    fn test_corrupt_products_json_is_an_error() {
        let err = WarehouseTransfer::try_from(model("c", Some("[{\"productId\":"))).unwrap_err();
        assert!(err.to_string().contains("products_json"));
    }

    #[test]
    fn test_blank_id_is_an_error() {
        assert!(WarehouseTransfer::try_from(model(" ", None)).is_err());
    }
}

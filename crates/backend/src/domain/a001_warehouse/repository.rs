use contracts::domain::a001_warehouse::aggregate::{Warehouse, WarehouseDto};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_warehouse")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Warehouse {
    fn from(m: Model) -> Self {
        Warehouse {
            id: m.id,
            code: m.code,
            name: m.name,
            address: m.address,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Warehouse>> {
    let items = Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Warehouse>> {
    Ok(Entity::find_by_id(id).one(conn()).await?.map(Into::into))
}

pub async fn get_by_code(code: &str) -> anyhow::Result<Option<Warehouse>> {
    let result = Entity::find()
        .filter(Column::Code.eq(code))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(dto: &WarehouseDto) -> anyhow::Result<i64> {
    let active = ActiveModel {
        code: Set(dto.code.trim().to_string()),
        name: Set(dto.name.trim().to_string()),
        address: Set(dto.address.clone()),
        ..Default::default()
    };
    let model = active.insert(conn()).await?;
    Ok(model.id)
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

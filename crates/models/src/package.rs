use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category: String,
    pub name: String,
    pub price: i64,
    #[sea_orm(column_type = "Text")]
    pub features: String,
    #[sea_orm(column_type = "Text")]
    pub contact_message_template: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Validated field set shared by create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPackage {
    pub category: String,
    pub name: String,
    pub price: i64,
    pub features: String,
    pub contact_message_template: String,
}

impl NewPackage {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.category.trim().is_empty() {
            return Err(ModelError::Validation("category required".into()));
        }
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        if self.price < 0 {
            return Err(ModelError::Validation("price must not be negative".into()));
        }
        Ok(())
    }
}

/// Coerce a submitted price to an integer. Surrounding whitespace is ignored.
pub fn parse_price(raw: &str) -> Result<i64, ModelError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("price required".into()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ModelError::Validation(format!("price must be a whole number, got {trimmed:?}")))
}

/// Public order: category, then price, id breaks ties.
pub async fn list_public(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::Category)
        .order_by_asc(Column::Price)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Admin order: category, then id.
pub async fn list_admin(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::Category)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, input: &NewPackage) -> Result<Model, ModelError> {
    input.validate()?;
    let am = ActiveModel {
        category: Set(input.category.clone()),
        name: Set(input.name.clone()),
        price: Set(input.price),
        features: Set(input.features.clone()),
        contact_message_template: Set(input.contact_message_template.clone()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every field of an existing row. `None` when the id is unknown.
pub async fn update(db: &DatabaseConnection, id: i32, input: &NewPackage) -> Result<Option<Model>, ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(id),
        category: Set(input.category.clone()),
        name: Set(input.name.clone()),
        price: Set(input.price),
        features: Set(input.features.clone()),
        contact_message_template: Set(input.contact_message_template.clone()),
    };
    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

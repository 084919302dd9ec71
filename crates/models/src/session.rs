use sea_orm::{entity::prelude::*, DatabaseConnection, Set};

use crate::errors::ModelError;

/// Server-side login session. `data` holds the serialized session payload.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    pub data: Vec<u8>,
    pub expires_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn insert(
    db: &DatabaseConnection,
    id: &str,
    data: Vec<u8>,
    expires_at: DateTimeWithTimeZone,
) -> Result<Model, ModelError> {
    let am = ActiveModel { id: Set(id.to_string()), data: Set(data), expires_at: Set(expires_at) };
    Ok(am.insert(db).await?)
}

/// Unexpired session by id.
pub async fn find_live(db: &DatabaseConnection, id: &str, now: DateTimeWithTimeZone) -> Result<Option<Model>, ModelError> {
    let found = Entity::find_by_id(id.to_string())
        .filter(Column::ExpiresAt.gt(now))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), ModelError> {
    Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(())
}

pub async fn delete_expired(db: &DatabaseConnection, now: DateTimeWithTimeZone) -> Result<u64, ModelError> {
    let res = Entity::delete_many().filter(Column::ExpiresAt.lte(now)).exec(db).await?;
    Ok(res.rows_affected)
}

//! Create `packages` table holding the public pricelist.
//!
//! `category` is free text; the public page groups on exact string equality.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(pk_auto(Packages::Id))
                    .col(string_len(Packages::Category, 100).not_null())
                    .col(string_len(Packages::Name, 255).not_null())
                    .col(big_integer(Packages::Price).not_null())
                    .col(text(Packages::Features).not_null())
                    .col(text(Packages::ContactMessageTemplate).not_null().default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Packages::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Packages { Table, Id, Category, Name, Price, Features, ContactMessageTemplate }

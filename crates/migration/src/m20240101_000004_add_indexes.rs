use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Sessions: expiry lookups and purges
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_sessions_expires_at")
                    .table(UserSessions::Table)
                    .col(UserSessions::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        // Packages: public listing order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_packages_category_price")
                    .table(Packages::Table)
                    .col(Packages::Category)
                    .col(Packages::Price)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_sessions_expires_at").table(UserSessions::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_packages_category_price").table(Packages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserSessions { Table, ExpiresAt }

#[derive(DeriveIden)]
enum Packages { Table, Category, Price }

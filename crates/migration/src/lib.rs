//! Migrator registering the site tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_package;
mod m20240101_000002_create_admin;
mod m20240101_000003_create_user_sessions;
mod m20240101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_package::Migration),
            Box::new(m20240101_000002_create_admin::Migration),
            Box::new(m20240101_000003_create_user_sessions::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000004_add_indexes::Migration),
        ]
    }
}

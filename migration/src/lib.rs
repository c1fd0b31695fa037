pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_admin_users;
mod m20260801_000002_create_article_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_admin_users::Migration),
            Box::new(m20260801_000002_create_article_tables::Migration),
        ]
    }
}

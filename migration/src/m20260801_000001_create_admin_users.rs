use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(AdminUsers::Table)
                .if_not_exists()
                .col(ColumnDef::new(AdminUsers::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(AdminUsers::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(AdminUsers::Username).string().not_null().unique_key())
                .col(ColumnDef::new(AdminUsers::Email).string().not_null())
                .col(ColumnDef::new(AdminUsers::PasswordHash).string().not_null())
                .col(ColumnDef::new(AdminUsers::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AdminUsers::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum AdminUsers {
    Table,
    Id,
    PublicId,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
}

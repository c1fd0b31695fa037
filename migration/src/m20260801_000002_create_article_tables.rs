use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Articles Table
        manager.create_table(
            Table::create()
                .table(Articles::Table)
                .if_not_exists()
                .col(ColumnDef::new(Articles::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Articles::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(Articles::Title).string().not_null())
                .col(ColumnDef::new(Articles::Description).text().not_null())
                .col(ColumnDef::new(Articles::Content).text().not_null())
                .col(ColumnDef::new(Articles::HtmlContent).text().null())
                .col(ColumnDef::new(Articles::Status).string().not_null().default("draft"))
                .col(ColumnDef::new(Articles::PublishedAt).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Articles::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(Articles::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned(),
        ).await?;

        // Indexes for listing/sorting
        manager.create_index(Index::create().name("idx_articles_status").table(Articles::Table).col(Articles::Status).to_owned()).await?;
        manager.create_index(Index::create().name("idx_articles_published_at").table(Articles::Table).col(Articles::PublishedAt).to_owned()).await?;

        // 2. Tags Table
        manager.create_table(
            Table::create()
                .table(Tags::Table)
                .if_not_exists()
                .col(ColumnDef::new(Tags::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Tags::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                .col(ColumnDef::new(Tags::Color).string().not_null())
                .col(ColumnDef::new(Tags::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned(),
        ).await?;

        // 3. ArticleTags Join Table
        manager.create_table(
            Table::create()
                .table(ArticleTags::Table)
                .if_not_exists()
                .col(ColumnDef::new(ArticleTags::ArticleId).big_integer().not_null())
                .col(ColumnDef::new(ArticleTags::TagId).big_integer().not_null())
                .primary_key(Index::create().col(ArticleTags::ArticleId).col(ArticleTags::TagId))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_tags_article_id")
                        .from(ArticleTags::Table, ArticleTags::ArticleId)
                        .to(Articles::Table, Articles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_tags_tag_id")
                        .from(ArticleTags::Table, ArticleTags::TagId)
                        .to(Tags::Table, Tags::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 4. ArticleMedia Table
        manager.create_table(
            Table::create()
                .table(ArticleMedia::Table)
                .if_not_exists()
                .col(ColumnDef::new(ArticleMedia::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(ArticleMedia::ArticleId).big_integer().not_null())
                .col(ColumnDef::new(ArticleMedia::MediaUrl).string().not_null())
                .col(ColumnDef::new(ArticleMedia::MediaType).string().not_null())
                .col(ColumnDef::new(ArticleMedia::DisplayOrder).integer().not_null().default(0))
                .col(ColumnDef::new(ArticleMedia::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_media_article_id")
                        .from(ArticleMedia::Table, ArticleMedia::ArticleId)
                        .to(Articles::Table, Articles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(Index::create().name("idx_article_media_article_id").table(ArticleMedia::Table).col(ArticleMedia::ArticleId).to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ArticleMedia::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ArticleTags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Tags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Articles::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Articles {
    Table,
    Id,
    PublicId,
    Title,
    Description,
    Content,
    HtmlContent,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    PublicId,
    Name,
    Color,
    CreatedAt,
}

#[derive(Iden)]
enum ArticleTags {
    Table,
    ArticleId,
    TagId,
}

#[derive(Iden)]
enum ArticleMedia {
    Table,
    Id,
    ArticleId,
    MediaUrl,
    MediaType,
    DisplayOrder,
    CreatedAt,
}

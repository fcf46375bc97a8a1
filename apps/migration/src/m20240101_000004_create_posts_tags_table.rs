use sea_orm_migration::prelude::*;

use crate::m20240101_000002_create_posts_table::Posts;
use crate::m20240101_000003_create_tags_table::Tags;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostsTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostsTags::PostId).integer().not_null())
                    .col(ColumnDef::new(PostsTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(PostsTags::PostId)
                            .col(PostsTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_tags_post_id")
                            .from(PostsTags::Table, PostsTags::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_tags_tag_id")
                            .from(PostsTags::Table, PostsTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostsTags::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PostsTags {
    Table,
    PostId,
    TagId,
}

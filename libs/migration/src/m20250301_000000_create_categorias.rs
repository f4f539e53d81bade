use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categorias::Table)
                    .if_not_exists()
                    .col(pk_auto(Categorias::CategoriaId))
                    .col(string_len(Categorias::Nome, 80))
                    .col(string_len(Categorias::ImagemUrl, 300).default(""))
                    .to_owned(),
            )
            .await?;

        // Name filter and the default list ordering both hit this column
        manager
            .create_index(
                Index::create()
                    .name("idx_categorias_nome")
                    .table(Categorias::Table)
                    .col(Categorias::Nome)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categorias::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Categorias {
    Table,
    CategoriaId,
    Nome,
    ImagemUrl,
}

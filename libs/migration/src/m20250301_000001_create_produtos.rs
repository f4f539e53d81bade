use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_categorias::Categorias;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produtos::Table)
                    .if_not_exists()
                    .col(pk_auto(Produtos::ProdutoId))
                    .col(string_len(Produtos::Nome, 80))
                    .col(string_len(Produtos::Descricao, 300).default(""))
                    .col(double(Produtos::Preco))
                    .col(string_len(Produtos::ImagemUrl, 300).default(""))
                    .col(float(Produtos::Estoque).default(0.0))
                    .col(
                        timestamp_with_time_zone(Produtos::DataCadastro)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Produtos::CategoriaId))
                    // No cascade: a category with products cannot be deleted
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_produtos_categoria")
                            .from(Produtos::Table, Produtos::CategoriaId)
                            .to(Categorias::Table, Categorias::CategoriaId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_produtos_categoria_id")
                    .table(Produtos::Table)
                    .col(Produtos::CategoriaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_produtos_preco")
                    .table(Produtos::Table)
                    .col(Produtos::Preco)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Produtos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Produtos {
    Table,
    ProdutoId,
    Nome,
    Descricao,
    Preco,
    ImagemUrl,
    Estoque,
    DataCadastro,
    CategoriaId,
}

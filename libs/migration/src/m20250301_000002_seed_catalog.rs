use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            INSERT INTO categorias (nome, imagem_url)
            VALUES
                ('Bebidas', 'bebidas.jpg'),
                ('Lanches', 'lanches.jpg'),
                ('Sobremesas', 'sobremesas.jpg')
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO produtos (nome, descricao, preco, imagem_url, estoque, data_cadastro, categoria_id)
            SELECT p.nome, p.descricao, p.preco, p.imagem_url, p.estoque, NOW(), c.categoria_id
            FROM (
                VALUES
                    ('Coca-Cola Diet', 'Refrigerante de cola 350 ml', 5.45, 'cocacola.jpg', 50, 'Bebidas'),
                    ('Lanche de Atum', 'Lanche de atum com maionese', 8.50, 'atum.jpg', 10, 'Lanches'),
                    ('Pudim 100 g', 'Pudim de leite condensado 100 g', 6.75, 'pudim.jpg', 20, 'Sobremesas')
            ) AS p(nome, descricao, preco, imagem_url, estoque, categoria)
            JOIN categorias c ON c.nome = p.categoria
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DELETE FROM produtos WHERE nome IN ('Coca-Cola Diet', 'Lanche de Atum', 'Pudim 100 g')",
        )
        .await?;
        db.execute_unprepared(
            "DELETE FROM categorias WHERE nome IN ('Bebidas', 'Lanches', 'Sobremesas')",
        )
        .await?;
        Ok(())
    }
}

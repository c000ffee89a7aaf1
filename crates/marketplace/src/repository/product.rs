use crate::{
    abstract_trait::product::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::{Product, ProductWithSeller},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.description, p.price, p.stock, p.seller_id, p.created_at, p.updated_at, p.deleted_at";

pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_live(&self) -> Result<Vec<ProductWithSeller>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, u.name AS seller_name
            FROM products p
            JOIN users u ON u.id = p.seller_id
            WHERE p.deleted_at IS NULL
            ORDER BY p.created_at DESC, p.id DESC
            "#
        );

        let products = sqlx::query_as::<_, ProductWithSeller>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch catalog: {:?}", err);
                RepositoryError::from(err)
            })?;

        Ok(products)
    }

    async fn find_live_by_id(&self, id: i32) -> Result<Option<ProductWithSeller>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, u.name AS seller_name
            FROM products p
            JOIN users u ON u.id = p.seller_id
            WHERE p.id = $1 AND p.deleted_at IS NULL
            "#
        );

        let product = sqlx::query_as::<_, ProductWithSeller>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch product {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        Ok(product)
    }

    async fn find_by_seller(&self, seller_id: i32) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            WHERE p.seller_id = $1 AND p.deleted_at IS NULL
            ORDER BY p.created_at DESC, p.id DESC
            "#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(seller_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to fetch products of seller {}: {:?}",
                    seller_id, err
                );
                RepositoryError::from(err)
            })?;

        Ok(products)
    }
}

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        seller_id: i32,
        req: &CreateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, stock, seller_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, stock, seller_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&req.name)
        .bind(req.description.as_deref().unwrap_or_default())
        .bind(req.price)
        .bind(req.stock)
        .bind(seller_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create product for seller {}: {:?}",
                seller_id, err
            );
            RepositoryError::from_constraint(err)
        })?;

        info!(
            "✅ Created product ID {} for seller {}",
            product.id, seller_id
        );
        Ok(product)
    }

    async fn update_product(
        &self,
        seller_id: i32,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name        = COALESCE($3, name),
                description = COALESCE($4, description),
                price       = COALESCE($5, price),
                stock       = COALESCE($6, stock),
                updated_at  = now()
            WHERE id = $1 AND seller_id = $2 AND deleted_at IS NULL
            RETURNING id, name, description, price, stock, seller_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(seller_id)
        .bind(req.name.as_deref())
        .bind(req.description.as_deref())
        .bind(req.price)
        .bind(req.stock)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product {}: {:?}", id, err);
            RepositoryError::from_constraint(err)
        })?;

        if product.is_some() {
            info!("✅ Updated product ID {}", id);
        }
        Ok(product)
    }

    async fn assign_stock(
        &self,
        seller_id: i32,
        id: i32,
        stock: i32,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock = $3, updated_at = now()
            WHERE id = $1 AND seller_id = $2 AND deleted_at IS NULL
            RETURNING id, name, description, price, stock, seller_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(seller_id)
        .bind(stock)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to set stock of product {}: {:?}", id, err);
            RepositoryError::from_constraint(err)
        })?;

        if product.is_some() {
            info!("✅ Stock of product ID {} set to {}", id, stock);
        }
        Ok(product)
    }

    async fn soft_delete(&self, seller_id: i32, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND seller_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(seller_id)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to delete product {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Product ID {} removed from catalog", id);
        }
        Ok(deleted)
    }
}

use crate::{
    abstract_trait::cart::CartRepositoryTrait,
    model::cart_item::{CartItem, CartLine},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn find_lines(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT c.id, c.user_id, c.product_id, c.quantity, c.created_at,
                   p.name AS product_name, p.price AS product_price,
                   p.stock AS product_stock, p.seller_id
            FROM cart_items c
            LEFT JOIN products p ON p.id = c.product_id AND p.deleted_at IS NULL
            WHERE c.user_id = $1
            ORDER BY c.created_at, c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch cart of user {}: {:?}", user_id, err);
            RepositoryError::from(err)
        })?;

        Ok(lines)
    }

    async fn find_by_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, user_id, product_id, quantity, created_at
            FROM cart_items
            WHERE user_id = $1 AND product_id = $2
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(item)
    }

    async fn insert_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product_id, quantity, created_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to add product {} to cart of user {}: {:?}",
                product_id, user_id, err
            );
            RepositoryError::from_constraint(err)
        })?;

        info!(
            "🛒 Cart line {} created for user {} (product {} x{})",
            item.id, user_id, product_id, quantity
        );
        Ok(item)
    }

    async fn set_quantity(&self, id: i32, quantity: i32) -> Result<CartItem, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $2
            WHERE id = $1
            RETURNING id, user_id, product_id, quantity, created_at
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update cart line {}: {:?}", id, err);
            RepositoryError::from_constraint(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🛒 Cart line {} now holds {}", id, quantity);
        Ok(item)
    }

    async fn delete_item(&self, user_id: i32, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to remove cart line {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

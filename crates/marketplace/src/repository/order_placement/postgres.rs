use crate::{
    abstract_trait::order_placement::{OrderPlacementSession, OrderPlacementStoreTrait},
    domain::placement::{OrderDraft, OrderItemDraft},
    model::{cart_item::CartSnapshotRow, order::Order, order_item::OrderItem},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use tracing::{debug, error, info};

pub struct PostgresOrderPlacementStore {
    db: ConnectionPool,
}

impl PostgresOrderPlacementStore {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderPlacementStoreTrait for PostgresOrderPlacementStore {
    async fn begin(&self) -> Result<Box<dyn OrderPlacementSession>, RepositoryError> {
        let tx = self.db.begin().await.map_err(|err| {
            error!("❌ Failed to open order placement transaction: {:?}", err);
            RepositoryError::from(err)
        })?;

        Ok(Box::new(PostgresOrderPlacementSession { tx }))
    }
}

/// Wraps one Postgres transaction. sqlx rolls the transaction back when it is
/// dropped uncommitted, which covers early returns, timeouts and cancellation.
pub struct PostgresOrderPlacementSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl OrderPlacementSession for PostgresOrderPlacementSession {
    async fn cart_snapshot(
        &mut self,
        user_id: i32,
    ) -> Result<Vec<CartSnapshotRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartSnapshotRow>(
            r#"
            SELECT c.id AS cart_item_id, c.product_id, c.quantity,
                   p.name AS product_name, p.price, p.stock, p.seller_id
            FROM cart_items c
            LEFT JOIN products p ON p.id = c.product_id AND p.deleted_at IS NULL
            WHERE c.user_id = $1
            ORDER BY c.product_id, c.id
            FOR UPDATE OF c
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to lock cart of user {}: {:?}", user_id, err);
            RepositoryError::from(err)
        })?;

        debug!("Locked {} cart lines for user {}", rows.len(), user_id);
        Ok(rows)
    }

    async fn insert_order(&mut self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, total, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, total, status, created_at
            "#,
        )
        .bind(draft.user_id)
        .bind(draft.total)
        .bind(draft.status.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to insert order for user {}: {:?}",
                draft.user_id, err
            );
            RepositoryError::from_constraint(err)
        })?;

        Ok(order)
    }

    async fn insert_order_item(
        &mut self,
        order_id: i32,
        item: &OrderItemDraft,
    ) -> Result<OrderItem, RepositoryError> {
        let row = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, order_id, product_id, quantity, price, status
            "#,
        )
        .bind(order_id)
        .bind(item.product.id)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.status.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to insert item for product {} on order {}: {:?}",
                item.product.id, order_id, err
            );
            RepositoryError::from_constraint(err)
        })?;

        Ok(row)
    }

    async fn decrement_stock(
        &mut self,
        product_id: i32,
        quantity: i32,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $1, updated_at = now()
            WHERE id = $2 AND stock >= $1 AND deleted_at IS NULL
            "#,
        )
        .bind(quantity)
        .bind(product_id)
        .execute(&mut *self.tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to decrement stock of product {}: {:?}",
                product_id, err
            );
            RepositoryError::from(err)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_cart(
        &mut self,
        user_id: i32,
        cart_item_ids: &[i32],
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(cart_item_ids)
            .execute(&mut *self.tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to clear cart of user {}: {:?}", user_id, err);
                RepositoryError::from(err)
            })?;

        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let session = *self;
        session.tx.commit().await.map_err(|err| {
            error!("❌ Order placement commit failed: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("✅ Order placement transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        let session = *self;
        session.tx.rollback().await.map_err(RepositoryError::from)
    }
}

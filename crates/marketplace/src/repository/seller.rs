use crate::{
    abstract_trait::seller::SellerRepositoryTrait,
    domain::status::FulfillmentStatus,
    model::{dashboard::DashboardStats, order::OrderWithBuyer, order_item::OrderItemDetail},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct SellerRepository {
    db: ConnectionPool,
}

impl SellerRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SellerRepositoryTrait for SellerRepository {
    async fn find_orders(
        &self,
        seller_id: i32,
        pending_only: bool,
    ) -> Result<Vec<OrderWithBuyer>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let (filter, ordering) = if pending_only {
            ("AND o.status = 'pending'", "ASC")
        } else {
            ("", "DESC")
        };

        let sql = format!(
            r#"
            SELECT o.id, o.user_id, o.total, o.status, o.created_at,
                   u.name AS buyer_name, u.email AS buyer_email
            FROM orders o
            JOIN users u ON u.id = o.user_id
            WHERE EXISTS (
                SELECT 1
                FROM order_items oi
                JOIN products p ON p.id = oi.product_id
                WHERE oi.order_id = o.id AND p.seller_id = $1
            )
            {filter}
            ORDER BY o.created_at {ordering}, o.id {ordering}
            "#
        );

        let orders = sqlx::query_as::<_, OrderWithBuyer>(&sql)
            .bind(seller_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to fetch orders for seller {}: {:?}",
                    seller_id, err
                );
                RepositoryError::from(err)
            })?;

        Ok(orders)
    }

    async fn find_items(
        &self,
        seller_id: i32,
        order_ids: &[i32],
    ) -> Result<Vec<OrderItemDetail>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, OrderItemDetail>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price, oi.status,
                   p.name AS product_name, p.seller_id
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ANY($1) AND p.seller_id = $2
            ORDER BY oi.order_id, oi.id
            "#,
        )
        .bind(order_ids)
        .bind(seller_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to fetch order items for seller {}: {:?}",
                seller_id, err
            );
            RepositoryError::from(err)
        })?;

        Ok(items)
    }

    async fn update_item_status(
        &self,
        seller_id: i32,
        item_id: i32,
        status: FulfillmentStatus,
    ) -> Result<Option<OrderItemDetail>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let item = sqlx::query_as::<_, OrderItemDetail>(
            r#"
            UPDATE order_items oi
            SET status = $3
            FROM products p
            WHERE oi.id = $1 AND p.id = oi.product_id AND p.seller_id = $2
            RETURNING oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price, oi.status,
                      p.name AS product_name, p.seller_id
            "#,
        )
        .bind(item_id)
        .bind(seller_id)
        .bind(status.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update order item {}: {:?}", item_id, err);
            RepositoryError::from_constraint(err)
        })?;

        if item.is_some() {
            info!("📦 Order item {} marked {}", item_id, status);
        }
        Ok(item)
    }

    async fn dashboard_stats(&self, seller_id: i32) -> Result<DashboardStats, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            WITH own_products AS (
                SELECT id, stock
                FROM products
                WHERE seller_id = $1 AND deleted_at IS NULL
            ),
            own_items AS (
                SELECT oi.quantity, oi.price, oi.status
                FROM order_items oi
                JOIN products p ON p.id = oi.product_id
                WHERE p.seller_id = $1
            )
            SELECT
                (SELECT COUNT(*) FROM own_products) AS total_products,
                (SELECT COUNT(*) FROM own_items) AS total_order_items,
                (SELECT COUNT(*) FROM own_items WHERE status = 'pending') AS pending_order_items,
                (SELECT COUNT(*) FROM own_items WHERE status = 'completed') AS completed_order_items,
                (SELECT COALESCE(SUM(price * quantity), 0)::NUMERIC(14, 2)
                   FROM own_items WHERE status = 'completed') AS total_revenue,
                (SELECT COUNT(*) FROM own_products WHERE stock < 5) AS low_stock_products
            "#,
        )
        .bind(seller_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to compute dashboard for seller {}: {:?}",
                seller_id, err
            );
            RepositoryError::from(err)
        })?;

        Ok(stats)
    }
}

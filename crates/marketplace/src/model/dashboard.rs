use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_order_items: i64,
    pub pending_order_items: i64,
    pub completed_order_items: i64,
    pub total_revenue: Decimal,
    pub low_stock_products: i64,
}

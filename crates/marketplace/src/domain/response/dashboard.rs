use crate::model::dashboard::DashboardStats;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub total_products: i64,
    pub total_order_items: i64,
    pub pending_order_items: i64,
    pub completed_order_items: i64,
    pub total_revenue: Decimal,
    pub low_stock_products: i64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(value: DashboardStats) -> Self {
        DashboardStatsResponse {
            total_products: value.total_products,
            total_order_items: value.total_order_items,
            pending_order_items: value.pending_order_items,
            completed_order_items: value.completed_order_items,
            total_revenue: value.total_revenue,
            low_stock_products: value.low_stock_products,
        }
    }
}

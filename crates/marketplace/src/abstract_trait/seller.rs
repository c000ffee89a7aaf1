use crate::{
    domain::{
        response::{
            dashboard::DashboardStatsResponse,
            order::{OrderItemResponse, SellerOrderResponse},
        },
        status::FulfillmentStatus,
    },
    model::{dashboard::DashboardStats, order::OrderWithBuyer, order_item::OrderItemDetail},
};
use async_trait::async_trait;
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynSellerRepository = Arc<dyn SellerRepositoryTrait + Send + Sync>;
pub type DynSellerOrderService = Arc<dyn SellerOrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait SellerRepositoryTrait {
    /// Orders holding at least one of the seller's products. Pending-only lists run oldest first.
    async fn find_orders(
        &self,
        seller_id: i32,
        pending_only: bool,
    ) -> Result<Vec<OrderWithBuyer>, RepositoryError>;
    async fn find_items(
        &self,
        seller_id: i32,
        order_ids: &[i32],
    ) -> Result<Vec<OrderItemDetail>, RepositoryError>;
    async fn update_item_status(
        &self,
        seller_id: i32,
        item_id: i32,
        status: FulfillmentStatus,
    ) -> Result<Option<OrderItemDetail>, RepositoryError>;
    async fn dashboard_stats(&self, seller_id: i32) -> Result<DashboardStats, RepositoryError>;
}

#[async_trait]
pub trait SellerOrderServiceTrait {
    async fn find_orders(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<SellerOrderResponse>>, ServiceError>;
    async fn find_pending_orders(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<SellerOrderResponse>>, ServiceError>;
    async fn update_item_status(
        &self,
        seller: &AuthenticatedUser,
        item_id: i32,
        status: &str,
    ) -> Result<ApiResponse<OrderItemResponse>, ServiceError>;
    async fn dashboard_stats(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<DashboardStatsResponse>, ServiceError>;
}

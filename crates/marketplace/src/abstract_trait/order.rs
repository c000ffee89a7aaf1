use crate::{
    domain::response::order::OrderResponse,
    model::{order::Order, order_item::OrderItemDetail},
};
use async_trait::async_trait;
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;
pub type DynOrderPlacementService = Arc<dyn OrderPlacementServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError>;
    async fn find_items(&self, order_ids: &[i32]) -> Result<Vec<OrderItemDetail>, RepositoryError>;
}

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_by_user(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
}

#[async_trait]
pub trait OrderPlacementServiceTrait {
    /// Converts the buyer's whole cart into one committed order, or changes nothing.
    async fn place_order(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}

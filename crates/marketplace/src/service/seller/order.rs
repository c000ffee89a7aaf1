use crate::{
    abstract_trait::seller::{DynSellerRepository, SellerOrderServiceTrait},
    domain::{
        response::{
            dashboard::DashboardStatsResponse,
            order::{OrderItemResponse, SellerOrderResponse},
        },
        status::FulfillmentStatus,
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{ApiResponse, AuthenticatedUser, Role},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SellerOrderService {
    repository: DynSellerRepository,
    metrics: Metrics,
}

pub struct SellerOrderServiceDeps {
    pub repository: DynSellerRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl SellerOrderService {
    pub async fn new(deps: SellerOrderServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register("seller_order_service", &mut *deps.registry.lock().await);

        Self {
            repository: deps.repository,
            metrics,
        }
    }

    async fn load(
        &self,
        seller_id: i32,
        pending_only: bool,
    ) -> Result<Vec<SellerOrderResponse>, ServiceError> {
        let orders = self.repository.find_orders(seller_id, pending_only).await?;
        let order_ids: Vec<i32> = orders.iter().map(|order| order.order.id).collect();

        let mut items_by_order: HashMap<i32, Vec<OrderItemResponse>> = HashMap::new();
        for item in self.repository.find_items(seller_id, &order_ids).await? {
            items_by_order
                .entry(item.item.order_id)
                .or_default()
                .push(OrderItemResponse::from(item));
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.order.id).unwrap_or_default();
                SellerOrderResponse::from_parts(order, items)
            })
            .collect())
    }

    async fn list(
        &self,
        seller: &AuthenticatedUser,
        pending_only: bool,
    ) -> Result<ApiResponse<Vec<SellerOrderResponse>>, ServiceError> {
        seller.ensure_role(Role::Seller)?;

        let operation = if pending_only {
            "find_pending_seller_orders"
        } else {
            "find_seller_orders"
        };
        let tracing_ctx = TracingContext::start(
            "seller-order-service",
            operation,
            vec![KeyValue::new("seller_id", seller.user_id as i64)],
        );

        match self.load(seller.user_id, pending_only).await {
            Ok(orders) => {
                info!(
                    "📄 Seller {} sees {} orders (pending only: {})",
                    seller.user_id,
                    orders.len(),
                    pending_only
                );
                self.metrics
                    .complete(&tracing_ctx, Method::Get, true, "Seller orders fetched");
                Ok(ApiResponse::success("Orders retrieved successfully", orders))
            }
            Err(err) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Get, false, &err.to_string());
                Err(err)
            }
        }
    }
}

#[async_trait]
impl SellerOrderServiceTrait for SellerOrderService {
    async fn find_orders(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<SellerOrderResponse>>, ServiceError> {
        self.list(seller, false).await
    }

    async fn find_pending_orders(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<SellerOrderResponse>>, ServiceError> {
        self.list(seller, true).await
    }

    async fn update_item_status(
        &self,
        seller: &AuthenticatedUser,
        item_id: i32,
        status: &str,
    ) -> Result<ApiResponse<OrderItemResponse>, ServiceError> {
        seller.ensure_role(Role::Seller)?;
        let status: FulfillmentStatus = status.parse()?;

        let tracing_ctx = TracingContext::start(
            "seller-order-service",
            "update_order_item_status",
            vec![
                KeyValue::new("order_item_id", item_id as i64),
                KeyValue::new("status", status.as_str()),
            ],
        );

        let result = match self
            .repository
            .update_item_status(seller.user_id, item_id, status)
            .await
        {
            Ok(Some(detail)) => Ok(OrderItemResponse::from(detail)),
            Ok(None) => Err(ServiceError::NotFound(format!(
                "Order item {item_id} not found or not owned by seller"
            ))),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(item) => {
                info!("🚚 Order item {} marked {}", item_id, status);
                self.metrics
                    .complete(&tracing_ctx, Method::Patch, true, "Order item updated");
                Ok(ApiResponse::success("Order item status updated", item))
            }
            Err(err) => {
                warn!("❌ Failed to update order item {}: {}", item_id, err);
                self.metrics
                    .complete(&tracing_ctx, Method::Patch, false, &err.to_string());
                Err(err)
            }
        }
    }

    async fn dashboard_stats(
        &self,
        seller: &AuthenticatedUser,
    ) -> Result<ApiResponse<DashboardStatsResponse>, ServiceError> {
        seller.ensure_role(Role::Seller)?;

        let tracing_ctx = TracingContext::start(
            "seller-order-service",
            "dashboard_stats",
            vec![KeyValue::new("seller_id", seller.user_id as i64)],
        );

        match self.repository.dashboard_stats(seller.user_id).await {
            Ok(stats) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Get, true, "Dashboard fetched");
                Ok(ApiResponse::success(
                    "Dashboard stats retrieved successfully",
                    DashboardStatsResponse::from(stats),
                ))
            }
            Err(err) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Get, false, &err.to_string());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod order_tests;

use crate::{
    abstract_trait::order::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::response::order::{OrderItemResponse, OrderResponse},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    metrics: Metrics,
}

pub struct OrderQueryServiceDeps {
    pub query: DynOrderQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl OrderQueryService {
    pub async fn new(deps: OrderQueryServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register("order_query_service", &mut *deps.registry.lock().await);

        Self {
            query: deps.query,
            metrics,
        }
    }

    async fn load(&self, user_id: i32) -> Result<Vec<OrderResponse>, ServiceError> {
        let orders = self.query.find_by_user(user_id).await?;
        let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();

        let mut items_by_order: HashMap<i32, Vec<OrderItemResponse>> = HashMap::new();
        for item in self.query.find_items(&order_ids).await? {
            items_by_order
                .entry(item.item.order_id)
                .or_default()
                .push(OrderItemResponse::from(item));
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderResponse::from_parts(order, items)
            })
            .collect())
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_user(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        identity.ensure_owner(user_id)?;

        let tracing_ctx = TracingContext::start(
            "order-query-service",
            "find_orders_by_user",
            vec![KeyValue::new("user_id", user_id as i64)],
        );

        match self.load(user_id).await {
            Ok(orders) => {
                info!("📄 Fetched {} orders for user {}", orders.len(), user_id);
                self.metrics
                    .complete(&tracing_ctx, Method::Get, true, "Orders fetched");
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

use super::{OrderPlacementError, plan};
use crate::{
    abstract_trait::{
        order::OrderPlacementServiceTrait,
        order_placement::{DynOrderPlacementStore, OrderPlacementSession},
    },
    domain::response::order::{OrderItemResponse, OrderResponse},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::ServiceError,
    utils::{Method, Metrics, OrderPlacementMetrics, PlacementOutcome, TracingContext},
};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Progress of one placement attempt. `RolledBack` is reachable from every
/// non-terminal state; the others only advance one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    Started,
    SnapshotRead,
    Validated,
    Assembled,
    StockApplied,
    CartCleared,
    Committed,
    RolledBack,
}

impl PlacementState {
    pub fn successor(self) -> Option<Self> {
        match self {
            PlacementState::Started => Some(PlacementState::SnapshotRead),
            PlacementState::SnapshotRead => Some(PlacementState::Validated),
            PlacementState::Validated => Some(PlacementState::Assembled),
            PlacementState::Assembled => Some(PlacementState::StockApplied),
            PlacementState::StockApplied => Some(PlacementState::CartCleared),
            PlacementState::CartCleared => Some(PlacementState::Committed),
            PlacementState::Committed | PlacementState::RolledBack => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.successor().is_none()
    }
}

struct Placement {
    user_id: i32,
    state: PlacementState,
}

impl Placement {
    fn new(user_id: i32) -> Self {
        Self {
            user_id,
            state: PlacementState::Started,
        }
    }

    fn advance(&mut self, next: PlacementState) {
        debug_assert_eq!(self.state.successor(), Some(next));
        debug!(
            "Order placement for user {}: {:?} -> {:?}",
            self.user_id, self.state, next
        );
        self.state = next;
    }

    fn roll_back(&mut self, err: &OrderPlacementError) {
        if self.state.is_terminal() {
            return;
        }
        warn!(
            "↩️ Order placement for user {} rolled back from {:?}: {}",
            self.user_id, self.state, err
        );
        self.state = PlacementState::RolledBack;
    }
}

#[derive(Clone)]
pub struct OrderPlacementService {
    store: DynOrderPlacementStore,
    metrics: Metrics,
    outcomes: OrderPlacementMetrics,
    timeout: Duration,
    conflict_retries: u32,
}

pub struct OrderPlacementServiceDeps {
    pub store: DynOrderPlacementStore,
    pub registry: Arc<Mutex<Registry>>,
    pub timeout: Duration,
    pub conflict_retries: u32,
}

impl OrderPlacementService {
    pub async fn new(deps: OrderPlacementServiceDeps) -> Self {
        let OrderPlacementServiceDeps {
            store,
            registry,
            timeout,
            conflict_retries,
        } = deps;

        let metrics = Metrics::new();
        let outcomes = OrderPlacementMetrics::new();
        {
            let mut registry = registry.lock().await;
            metrics.register("order_placement_service", &mut registry);
            outcomes.register(&mut registry);
        }

        Self {
            store,
            metrics,
            outcomes,
            timeout,
            conflict_retries,
        }
    }

    pub fn outcomes(&self) -> &OrderPlacementMetrics {
        &self.outcomes
    }

    /// Places the order under the configured deadline. When the deadline fires the
    /// in-flight session is dropped, which rolls it back.
    pub async fn place(&self, user_id: i32) -> Result<OrderResponse, OrderPlacementError> {
        match tokio::time::timeout(self.timeout, self.place_with_retry(user_id)).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    "⏱️ Order placement for user {} exceeded {:?}",
                    user_id, self.timeout
                );
                Err(OrderPlacementError::TimedOut(self.timeout))
            }
        }
    }

    async fn place_with_retry(&self, user_id: i32) -> Result<OrderResponse, OrderPlacementError> {
        let mut retries = 0;
        loop {
            match self.attempt(user_id).await {
                Err(err) if err.is_retryable() && retries < self.conflict_retries => {
                    retries += 1;
                    warn!(
                        "🔁 Retrying order placement for user {} ({}/{}): {}",
                        user_id, retries, self.conflict_retries, err
                    );
                }
                result => return result,
            }
        }
    }

    async fn attempt(&self, user_id: i32) -> Result<OrderResponse, OrderPlacementError> {
        let mut placement = Placement::new(user_id);
        let mut session = self.store.begin().await?;

        match Self::run_steps(&mut session, &mut placement).await {
            Ok(order) => match session.commit().await {
                Ok(()) => {
                    placement.advance(PlacementState::Committed);
                    Ok(order)
                }
                Err(err) => {
                    let err = OrderPlacementError::from(err);
                    placement.roll_back(&err);
                    Err(err)
                }
            },
            Err(err) => {
                placement.roll_back(&err);
                if let Err(rollback_err) = session.rollback().await {
                    warn!(
                        "⚠️ Rollback for user {} reported an error: {:?}",
                        user_id, rollback_err
                    );
                }
                Err(err)
            }
        }
    }

    async fn run_steps(
        session: &mut Box<dyn OrderPlacementSession>,
        placement: &mut Placement,
    ) -> Result<OrderResponse, OrderPlacementError> {
        let user_id = placement.user_id;

        let rows = session.cart_snapshot(user_id).await?;
        let lines = plan::read_snapshot(rows)?;
        placement.advance(PlacementState::SnapshotRead);

        let plan = plan::validate(&lines)?;
        placement.advance(PlacementState::Validated);

        let draft = plan::assemble(user_id, &plan);
        let order = session.insert_order(&draft).await?;
        let mut items = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            let row = session.insert_order_item(order.id, item).await?;
            items.push(OrderItemResponse::from_parts(row, item.product.clone()));
        }
        placement.advance(PlacementState::Assembled);

        for line in &plan.lines {
            if !session.decrement_stock(line.product.id, line.quantity).await? {
                return Err(OrderPlacementError::stock_conflict(&line.product.name));
            }
        }
        placement.advance(PlacementState::StockApplied);

        let cleared = session.clear_cart(user_id, &plan.cart_item_ids).await?;
        if cleared != plan.cart_item_ids.len() as u64 {
            return Err(OrderPlacementError::cart_conflict());
        }
        placement.advance(PlacementState::CartCleared);

        Ok(OrderResponse::from_parts(order, items))
    }
}

#[async_trait]
impl OrderPlacementServiceTrait for OrderPlacementService {
    async fn place_order(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        identity.ensure_owner(user_id)?;

        let tracing_ctx = TracingContext::start(
            "order-placement-service",
            "place_order",
            vec![KeyValue::new("user_id", user_id as i64)],
        );

        match self.place(user_id).await {
            Ok(order) => {
                self.outcomes.record(PlacementOutcome::Committed);
                info!(
                    "✅ Order {} placed for user {} with {} items, total {}",
                    order.id,
                    user_id,
                    order.items.len(),
                    order.total
                );
                self.metrics
                    .complete(&tracing_ctx, Method::Post, true, "Order placed");

                Ok(ApiResponse::success("Order created successfully", order))
            }
            Err(err) => {
                self.outcomes.record(err.outcome());
                self.metrics
                    .complete(&tracing_ctx, Method::Post, false, &err.to_string());

                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "placement_tests.rs"]
mod placement_tests;

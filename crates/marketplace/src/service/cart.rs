use crate::{
    abstract_trait::{
        cart::{CartMutation, CartServiceTrait, DynCartRepository},
        product::DynProductQueryRepository,
    },
    domain::{requests::cart::AddToCartRequest, response::cart::CartItemResponse},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{ApiResponse, AuthenticatedUser},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct CartService {
    cart: DynCartRepository,
    products: DynProductQueryRepository,
    metrics: Metrics,
}

pub struct CartServiceDeps {
    pub cart: DynCartRepository,
    pub products: DynProductQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl CartService {
    pub async fn new(deps: CartServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register("cart_service", &mut *deps.registry.lock().await);

        Self {
            cart: deps.cart,
            products: deps.products,
            metrics,
        }
    }

    async fn add(
        &self,
        user_id: i32,
        req: &AddToCartRequest,
    ) -> Result<CartMutation, ServiceError> {
        let product = self
            .products
            .find_live_by_id(req.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", req.product_id)))?
            .product;

        let existing = self.cart.find_by_product(user_id, product.id).await?;
        let held = existing.as_ref().map_or(0, |item| item.quantity);

        // Cart additions are advisory; placement re-checks stock under lock.
        let wanted = held
            .checked_add(req.quantity)
            .filter(|wanted| *wanted <= product.stock)
            .ok_or_else(|| ServiceError::InsufficientStock("Insufficient stock".to_string()))?;

        let (created, item) = match existing {
            Some(item) => (false, self.cart.set_quantity(item.id, wanted).await?),
            None => (
                true,
                self.cart
                    .insert_item(user_id, product.id, req.quantity)
                    .await?,
            ),
        };

        let message = if created {
            "Item added to cart"
        } else {
            "Cart item quantity updated"
        };

        Ok(CartMutation {
            created,
            response: ApiResponse::success(message, CartItemResponse::from_parts(item, &product)),
        })
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<CartItemResponse>>, ServiceError> {
        identity.ensure_owner(user_id)?;

        let tracing_ctx = TracingContext::start(
            "cart-service",
            "get_cart",
            vec![KeyValue::new("user_id", user_id as i64)],
        );

        match self.cart.find_lines(user_id).await {
            Ok(lines) => {
                info!("🛒 Cart of user {} holds {} lines", user_id, lines.len());
                self.metrics
                    .complete(&tracing_ctx, Method::Get, true, "Cart fetched");
                let data = lines.into_iter().map(CartItemResponse::from).collect();
                Ok(ApiResponse::success("Cart retrieved successfully", data))
            }
            Err(err) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Get, false, &err.to_string());
                Err(err.into())
            }
        }
    }

    async fn add_to_cart(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
        req: &AddToCartRequest,
    ) -> Result<CartMutation, ServiceError> {
        identity.ensure_owner(user_id)?;

        let tracing_ctx = TracingContext::start(
            "cart-service",
            "add_to_cart",
            vec![
                KeyValue::new("user_id", user_id as i64),
                KeyValue::new("product_id", req.product_id as i64),
                KeyValue::new("quantity", req.quantity as i64),
            ],
        );

        match self.add(user_id, req).await {
            Ok(mutation) => {
                info!(
                    "🛒 User {} now has {} x product {} in cart",
                    user_id, mutation.response.data.quantity, req.product_id
                );
                self.metrics
                    .complete(&tracing_ctx, Method::Post, true, "Cart item saved");
                Ok(mutation)
            }
            Err(err) => {
                warn!(
                    "❌ Failed to add product {} to cart of user {}: {}",
                    req.product_id, user_id, err
                );
                self.metrics
                    .complete(&tracing_ctx, Method::Post, false, &err.to_string());
                Err(err)
            }
        }
    }

    async fn remove_from_cart(
        &self,
        identity: &AuthenticatedUser,
        user_id: i32,
        item_id: i32,
    ) -> Result<(), ServiceError> {
        identity.ensure_owner(user_id)?;

        let tracing_ctx = TracingContext::start(
            "cart-service",
            "remove_from_cart",
            vec![
                KeyValue::new("user_id", user_id as i64),
                KeyValue::new("cart_item_id", item_id as i64),
            ],
        );

        let result = match self.cart.delete_item(user_id, item_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::NotFound("Cart item not found".to_string())),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(()) => {
                info!("🗑️ Removed cart item {} of user {}", item_id, user_id);
                self.metrics
                    .complete(&tracing_ctx, Method::Delete, true, "Cart item removed");
                Ok(())
            }
            Err(err) => {
                self.metrics
                    .complete(&tracing_ctx, Method::Delete, false, &err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "cart_tests.rs"]
mod cart_tests;
